// tests/google_source.rs
//
// Sheets source against a local HTTP/1.0 stub standing in for both the token
// endpoint and the values API.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use laufchallenge::normalize::normalize;
use laufchallenge::source::credentials::ServiceAccount;
use laufchallenge::source::google::GoogleSheetSource;
use laufchallenge::source::{Cell, SheetSource, SourceError};

const KEY_PEM: &str = include_str!("fixtures/test_key.pem");

type Route = fn(&str) -> (u16, String);

struct Stub {
    base: String,
    seen: Arc<Mutex<Vec<String>>>,
}

/// Serve every connection with `route(path)`; requests are recorded verbatim
/// (request line + headers).
fn serve(route: Route) -> Stub {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            handle(stream, route, &log);
        }
    });
    Stub { base, seen }
}

fn handle(mut stream: TcpStream, route: Route, log: &Mutex<Vec<String>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut head = String::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
            break;
        }
        if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = v.trim().parse().unwrap_or(0);
        }
        head.push_str(&line);
    }
    let mut body = vec![0u8; content_length];
    let _ = reader.read_exact(&mut body);

    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    log.lock().unwrap().push(head);

    let (status, body) = route(&path);
    let reply = format!(
        "HTTP/1.0 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(reply.as_bytes());
}

fn account(base: &str) -> ServiceAccount {
    let json = serde_json::json!({
        "type": "service_account",
        "client_email": "dashboard@laufchallenge.iam.gserviceaccount.com",
        "private_key_id": "k1",
        "private_key": KEY_PEM,
        "token_uri": format!("{base}/token"),
    });
    ServiceAccount::from_json(&json.to_string()).unwrap()
}

fn source(stub: &Stub) -> GoogleSheetSource {
    GoogleSheetSource::new(account(&stub.base), "sheet-123", "Laufdaten").with_api_base(&stub.base)
}

fn token_ok(path: &str) -> Option<(u16, String)> {
    path.starts_with("/token")
        .then(|| (200, r#"{"access_token":"test-token","expires_in":3599,"token_type":"Bearer"}"#.to_string()))
}

#[test]
fn fetches_values_with_bearer_token() {
    let stub = serve(|path| {
        token_ok(path).unwrap_or_else(|| {
            (
                200,
                r#"{"range":"Laufdaten!A1:E4","majorDimension":"ROWS","values":[
                    ["Datum","KW","Gruppe","Name","KM"],
                    ["03.11.2025",45,"Blitz","Anna",5.5],
                    [],
                    ["04.11.2025",46,"Donner","Cem",10]
                ]}"#
                .to_string(),
            )
        })
    });

    let raw = source(&stub).fetch().unwrap();
    assert_eq!(raw.headers, vec!["Datum", "KW", "Gruppe", "Name", "KM"]);
    assert_eq!(raw.row_count(), 2);
    assert_eq!(raw.rows[0][4], Cell::Number(5.5));

    let n = normalize(&raw).unwrap();
    assert_eq!(n.total_km(), 15.5);
    assert_eq!(n.runs[1].week, Some(46));

    let seen = stub.seen.lock().unwrap();
    assert!(seen[0].starts_with("POST /token"));
    assert!(seen[1].starts_with("GET /v4/spreadsheets/sheet-123/values/%27Laufdaten%27?"));
    assert!(seen[1].contains("valueRenderOption=UNFORMATTED_VALUE"));
    assert!(seen[1].contains("Authorization: Bearer test-token"));
}

#[test]
fn worksheet_name_is_sent_as_quoted_range() {
    let stub = serve(|path| token_ok(path).unwrap_or_else(|| (200, r#"{"values":[["KM"],[4]]}"#.to_string())));
    let src = GoogleSheetSource::new(account(&stub.base), "sheet-123", "KW 1").with_api_base(&stub.base);

    let raw = src.fetch().unwrap();
    assert_eq!(raw.row_count(), 1);
    let seen = stub.seen.lock().unwrap();
    assert!(seen[1].starts_with("GET /v4/spreadsheets/sheet-123/values/%27KW%201%27?"));
}

#[test]
fn unknown_worksheet() {
    let stub = serve(|path| {
        token_ok(path).unwrap_or_else(|| {
            (400, r#"{"error":{"code":400,"message":"Unable to parse range: Laufdaten","status":"INVALID_ARGUMENT"}}"#.to_string())
        })
    });
    let err = source(&stub).fetch().unwrap_err();
    assert!(matches!(err, SourceError::WorksheetNotFound { ref worksheet } if worksheet == "Laufdaten"));
}

#[test]
fn unknown_spreadsheet() {
    let stub = serve(|path| {
        token_ok(path).unwrap_or_else(|| {
            (404, r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#.to_string())
        })
    });
    let err = source(&stub).fetch().unwrap_err();
    assert!(matches!(err, SourceError::SheetNotFound { .. }));
}

#[test]
fn rejected_assertion_is_an_auth_error() {
    let stub = serve(|_| (400, r#"{"error":"invalid_grant","error_description":"Invalid JWT Signature."}"#.to_string()));
    let err = source(&stub).fetch().unwrap_err();
    match err {
        SourceError::Auth(msg) => assert!(msg.contains("Invalid JWT Signature.")),
        other => panic!("unexpected {other:?}"),
    }
    // the values endpoint is never reached
    assert_eq!(stub.seen.lock().unwrap().len(), 1);
}

#[test]
fn signed_assertion_has_three_parts() {
    let acc = account("http://127.0.0.1:9");
    let jwt = acc.signed_assertion(1_700_000_000).unwrap();
    assert_eq!(jwt.split('.').count(), 3);
}
