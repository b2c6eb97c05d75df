use bytes::Bytes;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::body::ResponseBody;

/// Request method, parsed case-sensitively from the method token
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Method {
    Get,
    Post,
    Other(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Other(token) => token,
        }
    }
}

impl From<&str> for Method {
    fn from(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }
}

impl From<String> for Method {
    fn from(token: String) -> Self {
        Method::from(token.as_str())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract request descriptor, owned by the task processing it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Request {
    pub method: Method,
    pub path: String,
    #[serde(default, rename = "authorization")]
    pub auth_header: Option<String>,
}

impl Request {
    pub fn new(method: impl Into<Method>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            auth_header: None,
        }
    }

    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.auth_header = Some(value.into());
        self
    }
}

/// The fixed set of status lines a response can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLine {
    Ok,
    Unauthorized,
    NotFound,
    MethodNotAllowed,
}

impl StatusLine {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLine::Ok => "200 OK",
            StatusLine::Unauthorized => "401 Unauthorized",
            StatusLine::NotFound => "404 Not Found",
            StatusLine::MethodNotAllowed => "405 Method Not Allowed",
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            StatusLine::Ok => 200,
            StatusLine::Unauthorized => 401,
            StatusLine::NotFound => 404,
            StatusLine::MethodNotAllowed => 405,
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered header pairs; duplicate names are kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList(Vec<(String, String)>);

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Status, headers and a not-yet-drained body
#[derive(Debug)]
pub struct Response {
    pub status: StatusLine,
    pub headers: HeaderList,
    pub body: ResponseBody,
}

impl Response {
    /// Standard `text/html` response with a paced body
    pub fn html(status: StatusLine, chunks: Vec<Bytes>, pace: Duration) -> Self {
        let mut headers = HeaderList::new();
        headers.push("Content-Type", mime::TEXT_HTML.essence_str());

        Self {
            status,
            headers,
            body: ResponseBody::paced(chunks, pace),
        }
    }

    /// Status line, one `Name: Value` line per header, then a blank line
    pub fn render_head(&self) -> String {
        let mut head = format!("{}\n", self.status);
        for (name, value) in self.headers.iter() {
            head.push_str(&format!("{name}: {value}\n"));
        }
        head.push('\n');
        head
    }

    /// Drain the body and render the whole response as text
    pub async fn render(self) -> String {
        let mut text = self.render_head();
        let body = self.body.drain().await;
        text.push_str(&String::from_utf8_lossy(&body));
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!(Method::from("GET"), Method::Get);
        assert_eq!(Method::from("POST"), Method::Post);
        assert_eq!(Method::from("get"), Method::Other("get".to_string()));
        assert_eq!(Method::from("DELETE").to_string(), "DELETE");
    }

    #[test]
    fn test_status_lines_verbatim() {
        assert_eq!(StatusLine::Ok.as_str(), "200 OK");
        assert_eq!(StatusLine::Unauthorized.as_str(), "401 Unauthorized");
        assert_eq!(StatusLine::NotFound.as_str(), "404 Not Found");
        assert_eq!(StatusLine::MethodNotAllowed.as_str(), "405 Method Not Allowed");
        assert_eq!(StatusLine::MethodNotAllowed.code(), 405);
    }

    #[test]
    fn test_header_duplicates_preserved() {
        let mut headers = HeaderList::new();
        headers.push("Set-Cookie", "a=1");
        headers.push("Content-Type", "text/html");
        headers.push("Set-Cookie", "b=2");

        assert_eq!(headers.len(), 3);
        let cookies: Vec<_> = headers.get_all("set-cookie").collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
    }

    #[test]
    fn test_request_from_toml() {
        let request: Request = toml::from_str(
            r#"
method = "PUT"
path = "/http/example.com"
authorization = "Basic abc"
            "#,
        )
        .unwrap();

        assert_eq!(request.method, Method::Other("PUT".to_string()));
        assert_eq!(request.auth_header.as_deref(), Some("Basic abc"));
    }

    #[tokio::test]
    async fn test_render_response() {
        let response = Response::html(
            StatusLine::NotFound,
            vec![Bytes::from_static(b"Page "), Bytes::from_static(b"not found")],
            Duration::ZERO,
        );

        assert_eq!(response.render_head(), "404 Not Found\nContent-Type: text/html\n\n");
        assert_eq!(
            response.render().await,
            "404 Not Found\nContent-Type: text/html\n\nPage not found"
        );
    }
}
