//! HTTP exchanges with the device.
//!
//! Each request opens its own TCP connection, performs an HTTP/1.1
//! handshake and reads the full response before returning.

use std::time::Duration;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, COOKIE, HOST, USER_AGENT};
use http::{Method, Request, Response};
use http_body_util::{BodyExt, Full};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::error::{DeviceError, DeviceResult};
use crate::session::Session;
use crate::types::SensorSnapshot;

/// Per-request deadline when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CLIENT_AGENT: &str = concat!("mpower-client/", env!("CARGO_PKG_VERSION"));

/// Where the device lives and how to log into it.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Device `host:port`.
    pub address: String,
    pub username: String,
    pub password: String,
    /// Deadline for each HTTP exchange (connect through body read).
    pub timeout: Duration,
}

impl DeviceConfig {
    pub fn new(
        address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            password: password.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

/// Client for a single mPower device.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    config: DeviceConfig,
}

impl DeviceClient {
    pub fn new(config: DeviceConfig) -> Self {
        Self { config }
    }

    /// Device `host:port`.
    pub fn address(&self) -> &str {
        &self.config.address
    }

    /// Log into the device and return the session to use for reads.
    ///
    /// The login response status is not checked: a rejected login shows up
    /// later as an unreadable sensor response.
    pub async fn login(&self) -> DeviceResult<Session> {
        let presented = Session::generate();
        let form = serde_urlencoded::to_string(LoginForm {
            username: &self.config.username,
            password: &self.config.password,
        })?;

        let req = self
            .request(Method::POST, "/login.cgi", &presented)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Full::new(Bytes::from(form)))?;

        let resp = self.send(req).await?;
        if !resp.status().is_success() {
            warn!(
                status = %resp.status(),
                address = %self.config.address,
                "device login returned non-success status"
            );
        }

        let session = match Session::from_headers(resp.headers()) {
            Some(issued) => {
                debug!(address = %self.config.address, "device issued session id");
                issued
            }
            None => presented,
        };
        Ok(session)
    }

    /// Read the outlet sensor table using an existing session.
    pub async fn fetch_sensors(&self, session: &Session) -> DeviceResult<SensorSnapshot> {
        let req = self
            .request(Method::GET, "/sensors", session)
            .body(Full::new(Bytes::new()))?;

        let resp = self.send(req).await?;
        debug!(
            status = %resp.status(),
            bytes = resp.body().len(),
            address = %self.config.address,
            "sensor response received"
        );

        let snapshot = SensorSnapshot::from_slice(resp.body())?;
        debug!(outlets = snapshot.len(), "sensor data decoded");
        Ok(snapshot)
    }

    fn request(&self, method: Method, path: &str, session: &Session) -> http::request::Builder {
        Request::builder()
            .method(method)
            .uri(path)
            .header(HOST, self.config.address.as_str())
            .header(USER_AGENT, CLIENT_AGENT)
            .header(COOKIE, session.cookie_header())
    }

    async fn send(&self, req: Request<Full<Bytes>>) -> DeviceResult<Response<Bytes>> {
        let timeout = self.config.timeout;
        match tokio::time::timeout(timeout, self.exchange(req)).await {
            Ok(result) => result,
            Err(_) => Err(DeviceError::Timeout(timeout)),
        }
    }

    async fn exchange(&self, req: Request<Full<Bytes>>) -> DeviceResult<Response<Bytes>> {
        let address = &self.config.address;
        let stream = TcpStream::connect(address.as_str())
            .await
            .map_err(|source| DeviceError::Connect {
                address: address.clone(),
                source,
            })?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io).await?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!(error = %e, "device connection closed with error");
            }
        });

        let resp = sender.send_request(req).await?;
        let (parts, body) = resp.into_parts();
        let body = body.collect().await?.to_bytes();
        Ok(Response::from_parts(parts, body))
    }
}
