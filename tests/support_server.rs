use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::{Arc, Mutex, PoisonError, mpsc};
use std::thread;
use std::time::Duration;

/// Canned response for one request target (path plus query).
#[derive(Debug, Clone)]
pub struct Route {
    status: u16,
    delay: Duration,
    headers: Vec<(String, String)>,
    truncated: bool,
}

impl Route {
    pub fn ok() -> Self {
        Self::status(200)
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            delay: Duration::ZERO,
            headers: Vec::new(),
            truncated: false,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Announces a longer body than is sent, then closes the connection.
    pub fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// Minimal HTTP/1.1 server answering from a fixed route table.
pub struct ScriptedServer {
    base_url: String,
    requests: RequestLog,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ScriptedServer {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

impl ScriptedServer {
    /// Spawn a server on an ephemeral localhost port.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be created or configured.
    pub fn spawn(routes: Vec<(&str, Route)>) -> Result<Self, String> {
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(target, route)| (target.to_owned(), route))
                .collect(),
        );
        let listener = TcpListener::bind("127.0.0.1:0")
            .map_err(|err| format!("bind test server failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("server addr failed: {}", err))?;
        listener
            .set_nonblocking(true)
            .map_err(|err| format!("set_nonblocking failed: {}", err))?;

        let requests: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel();
        let thread_requests = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                match listener.accept() {
                    Ok((stream, _)) => {
                        let routes = Arc::clone(&routes);
                        let requests = Arc::clone(&thread_requests);
                        thread::spawn(move || handle_client(stream, &routes, &requests));
                    }
                    Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            requests,
            shutdown: shutdown_tx,
            thread: Some(handle),
        })
    }

    /// Server answering every endpoint of the default call list, plus login.
    ///
    /// `overrides` replace the default `200 OK` for individual targets.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be created or configured.
    pub fn spawn_frontend(overrides: Vec<(&str, Route)>) -> Result<Self, String> {
        let mut routes = vec![
            (
                "/api/auth/login",
                Route::ok().with_header("Set-Cookie", "session=demo-session; Path=/"),
            ),
            ("/api/session/me", Route::ok()),
            ("/rankings/top", Route::ok()),
            ("/rankings/top?limit=5", Route::ok()),
            ("/api/score", Route::ok()),
            ("/api/auth/logout", Route::ok()),
        ];
        for (target, route) in overrides {
            routes.retain(|(existing, _)| *existing != target);
            routes.push((target, route));
        }
        Self::spawn(routes)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, target: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.target == target)
            .count()
    }
}

/// Returns a base URL on which nothing is listening.
///
/// # Errors
///
/// Returns an error if no ephemeral port can be reserved.
pub fn unused_base_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind probe failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("probe addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

fn handle_client(stream: TcpStream, routes: &HashMap<String, Route>, requests: &RequestLog) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let Ok(read_half) = stream.try_clone() else {
        return;
    };
    let Some(request) = read_request(read_half) else {
        return;
    };

    let route = routes
        .get(&request.target)
        .cloned()
        .unwrap_or_else(|| Route::status(404));
    requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(request);

    if !route.delay.is_zero() {
        thread::sleep(route.delay);
    }
    write_response(stream, &route);
}

fn read_request(stream: TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_owned();
    let target = parts.next()?.to_owned();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_owned(), value.trim().to_owned()));
        }
    }

    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn write_response(mut stream: TcpStream, route: &Route) {
    let content_length = if route.truncated { 64 } else { 2 };
    let mut response = format!(
        "HTTP/1.1 {} Scripted\r\nContent-Length: {}\r\nConnection: close\r\n",
        route.status, content_length
    );
    for (key, value) in &route.headers {
        response.push_str(key);
        response.push_str(": ");
        response.push_str(value);
        response.push_str("\r\n");
    }
    response.push_str("\r\nOK");
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}
