// HTTP request and response types

use std::collections::HashMap;

/// HTTP request wrapper
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Set an `application/x-www-form-urlencoded` body from key/value pairs.
    pub fn with_form_body(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = serde_urlencoded::to_string(fields)
            .expect("string pairs always serialize")
            .into_bytes();
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        self
    }

    /// Set a JSON body.
    pub fn with_json_body(mut self, value: &serde_json::Value) -> Self {
        self.body = value.to_string().into_bytes();
        self.headers.insert(
            "Content-Type".to_string(),
            "application/json".to_string(),
        );
        self
    }

    /// Look up a field in the parsed request body.
    ///
    /// Tries a JSON object first, then an urlencoded form. Returns `None`
    /// for an empty body, an unparsable body, or a body without the field.
    pub fn body_field(&self, name: &str) -> Option<String> {
        if let Ok(json) = serde_json::from_slice::<serde_json::Value>(&self.body) {
            if let Some(value) = json.get(name) {
                return value.as_str().map(|s| s.to_string());
            }
        }

        if let Ok(form) = serde_urlencoded::from_bytes::<Vec<(String, String)>>(&self.body) {
            for (key, value) in form {
                if key == name {
                    return Some(value);
                }
            }
        }

        None
    }
}

/// HTTP response wrapper
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase accompanying the status line, when one was attached.
    pub reason: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            reason: None,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_field_from_form() {
        let req = HttpRequest::new("POST", "/submit").with_form_body(&[("csrf", "abc123")]);
        assert_eq!(req.body_field("csrf"), Some("abc123".to_string()));
        assert_eq!(req.body_field("other"), None);
    }

    #[test]
    fn test_body_field_from_json() {
        let req = HttpRequest::new("POST", "/submit")
            .with_json_body(&serde_json::json!({"csrf": "abc123", "name": "x"}));
        assert_eq!(req.body_field("csrf"), Some("abc123".to_string()));
    }

    #[test]
    fn test_body_field_empty_body() {
        let req = HttpRequest::new("POST", "/submit");
        assert_eq!(req.body_field("csrf"), None);
    }

    #[test]
    fn test_body_field_non_string_json_value() {
        let req =
            HttpRequest::new("POST", "/submit").with_json_body(&serde_json::json!({"csrf": 42}));
        assert_eq!(req.body_field("csrf"), None);
    }

    #[test]
    fn test_form_values_are_decoded() {
        let req = HttpRequest::new("POST", "/submit").with_form_body(&[("csrf", "a+b=c&d")]);
        assert_eq!(req.body_field("csrf"), Some("a+b=c&d".to_string()));
    }

    #[test]
    fn test_response_builders() {
        let res = HttpResponse::ok()
            .with_status(424)
            .with_reason("Failed Dependency")
            .with_header("Content-Type", "text/plain")
            .with_body(b"nope".to_vec());

        assert_eq!(res.status, 424);
        assert_eq!(res.reason.as_deref(), Some("Failed Dependency"));
        assert_eq!(res.headers.get("Content-Type").map(String::as_str), Some("text/plain"));
        assert_eq!(res.body, b"nope");
    }
}
