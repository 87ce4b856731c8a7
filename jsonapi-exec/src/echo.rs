use std::fmt::Write;

use crate::http::{HttpRequestParts, HttpResponseParts};

pub fn render_request(req: &HttpRequestParts) -> String {
    let mut out = format!("{} {} HTTP/1.1", req.method, req.url);
    for (k, v) in &req.headers {
        let _ = write!(out, "\n{k}: {v}");
    }
    push_content(&mut out, &req.body);
    out
}

pub fn render_response(resp: &HttpResponseParts) -> String {
    let mut out = format!("HTTP/1.1 {}", resp.status);
    for (k, v) in &resp.headers {
        let _ = write!(out, "\n{k}: {v}");
    }
    push_content(&mut out, &resp.body);
    out
}

fn push_content(out: &mut String, body: &[u8]) {
    if !body.is_empty() {
        let _ = write!(out, "\nContent: {}", String::from_utf8_lossy(body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use std::collections::BTreeMap;

    #[test]
    fn request_without_body_has_no_content_line() {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let req = HttpRequestParts {
            method: HttpMethod::Get,
            url: url::Url::parse("http://api.local/v1/movies").unwrap(),
            headers,
            body: vec![],
        };
        assert_eq!(
            render_request(&req),
            "GET http://api.local/v1/movies HTTP/1.1\nContent-Type: application/json"
        );
    }

    #[test]
    fn response_with_body() {
        let resp = HttpResponseParts {
            status: 201,
            headers: BTreeMap::new(),
            body: br#"{"id":1}"#.to_vec(),
        };
        assert_eq!(render_response(&resp), "HTTP/1.1 201\nContent: {\"id\":1}");
    }
}
