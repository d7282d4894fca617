#![cfg(feature = "api")]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn served_grid_reacts_to_scenarios() {
    let port = allocate_port();
    let addr = format!("127.0.0.1:{port}");
    let _child = spawn_api_process(port);

    wait_for_server(&addr, Duration::from_secs(8));

    let (status, body) = http(&addr, "GET", "/assets").expect("/assets should respond");
    assert_eq!(status, 200);
    let assets: Value = serde_json::from_str(&body).expect("assets body should be JSON");
    assert_eq!(assets.as_array().map(Vec::len), Some(6));

    let (status, body) =
        http(&addr, "POST", "/scenario/blackout").expect("/scenario should respond");
    assert_eq!(status, 200);
    let stats: Value = serde_json::from_str(&body).expect("stats body should be JSON");
    assert_eq!(stats["scenario"], "blackout");
    assert_eq!(stats["totalConsumption"], 0.0);

    let (status, _) = http(&addr, "POST", "/scenario/flood").expect("/scenario should respond");
    assert_eq!(status, 400);

    let (status, body) = http(&addr, "POST", "/reset").expect("/reset should respond");
    assert_eq!(status, 200);
    let stats: Value = serde_json::from_str(&body).expect("stats body should be JSON");
    assert_eq!(stats["scenario"], "normal");

    let (status, body) = http(&addr, "GET", "/events").expect("/events should respond");
    assert_eq!(status, 200);
    let events: Value = serde_json::from_str(&body).expect("events body should be JSON");
    assert_eq!(events.as_array().map(Vec::len), Some(3));
}

fn allocate_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port bind should succeed");
    let port = listener
        .local_addr()
        .expect("local_addr should be available")
        .port();
    drop(listener);
    port
}

fn spawn_api_process(port: u16) -> ChildGuard {
    let port = port.to_string();
    let child = Command::new(env!("CARGO_BIN_EXE_vpp-dashboard"))
        .args(["--serve", "--port", port.as_str(), "--seed", "1"])
        .env("RUST_LOG", "off")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("vpp-dashboard process should spawn");

    ChildGuard { child }
}

fn wait_for_server(addr: &str, timeout: Duration) {
    let start = Instant::now();
    loop {
        if let Ok((status, _)) = http(addr, "GET", "/stats") {
            if status == 200 {
                return;
            }
        }

        if start.elapsed() >= timeout {
            panic!("timed out waiting for API server on {addr}");
        }

        thread::sleep(Duration::from_millis(50));
    }
}

fn http(addr: &str, method: &str, path: &str) -> Result<(u16, String), String> {
    let mut stream = TcpStream::connect(addr).map_err(|err| format!("connect: {err}"))?;
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    );
    stream
        .write_all(request.as_bytes())
        .map_err(|err| format!("write: {err}"))?;

    let mut raw = String::new();
    stream
        .read_to_string(&mut raw)
        .map_err(|err| format!("read: {err}"))?;

    let (head, body) = raw
        .split_once("\r\n\r\n")
        .ok_or_else(|| "invalid HTTP response".to_string())?;
    let status_line = head
        .lines()
        .next()
        .ok_or_else(|| "missing status line".to_string())?;
    let status_code = status_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| "missing status code".to_string())?
        .parse::<u16>()
        .map_err(|err| format!("invalid status code: {err}"))?;

    Ok((status_code, body.to_string()))
}
