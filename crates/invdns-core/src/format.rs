//! Response rendering for stdout

use crate::action::Action;
use crate::config::OutputFormat;
use crate::dispatch::{Dispatched, Outcome};
use crate::traits::{ApiRequest, ApiResponse};
use serde_json::{Value, json};

/// Render a dispatched invocation
pub fn render(dispatched: &Dispatched, format: OutputFormat) -> String {
    match &dispatched.outcome {
        Outcome::Sent(response) => render_response(dispatched, response, format),
        Outcome::DryRun(request) => render_dry_run(request, format),
    }
}

fn render_response(dispatched: &Dispatched, response: &ApiResponse, format: OutputFormat) -> String {
    if response.body.trim().is_empty() {
        return acknowledgement(dispatched);
    }

    match format {
        OutputFormat::Text => response.body.clone(),
        OutputFormat::Json => response
            .json()
            .map(|value| pretty(&value))
            .unwrap_or_else(|| response.body.clone()),
    }
}

fn render_dry_run(request: &ApiRequest, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => pretty(&json!({
            "dry_run": true,
            "method": request.method.as_str(),
            "path": request.path,
            "query": request.query,
            "body": request.body,
        })),
        OutputFormat::Text => {
            let mut out = format!("DRY-RUN: {} {}", request.method, request.path);
            if let Some(ref body) = request.body {
                out.push('\n');
                out.push_str(&pretty(&Value::Object(body.clone())));
            }
            out
        }
    }
}

fn acknowledgement(dispatched: &Dispatched) -> String {
    let done = match dispatched.action {
        Action::Create => "Created",
        Action::Update => "Updated",
        Action::Delete => "Deleted",
        Action::Detail => "Fetched",
    };
    match dispatched.pk {
        Some(pk) => format!("{} {} record {}", done, dispatched.dtype, pk),
        None => format!("{} {} record", done, dispatched.dtype),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::HttpMethod;

    fn sent(action: Action, pk: Option<u64>, status: u16, body: &str) -> Dispatched {
        Dispatched {
            dtype: "CNAME",
            action,
            pk,
            outcome: Outcome::Sent(ApiResponse::new(status, body)),
        }
    }

    #[test]
    fn test_text_prints_body_unchanged() {
        let body = r#"{"target": "www.example.com", "pk": 3, "views": ["private", "public"], "ttl": null}"#;
        let dispatched = sent(Action::Detail, Some(3), 200, body);
        assert_eq!(render(&dispatched, OutputFormat::Text), body);
    }

    #[test]
    fn test_text_keeps_distinct_bodies_distinct() {
        let joined = sent(Action::Detail, Some(3), 200, r#"{"views": ["a, b"]}"#);
        let split = sent(Action::Detail, Some(3), 200, r#"{"views": ["a", "b"]}"#);
        assert_ne!(
            render(&joined, OutputFormat::Text),
            render(&split, OutputFormat::Text)
        );
    }

    #[test]
    fn test_json_is_pretty() {
        let dispatched = sent(Action::Create, None, 201, r#"{"pk":4}"#);
        assert_eq!(render(&dispatched, OutputFormat::Json), "{\n  \"pk\": 4\n}");
    }

    #[test]
    fn test_empty_body_acknowledged() {
        let dispatched = sent(Action::Delete, Some(8), 204, "");
        assert_eq!(render(&dispatched, OutputFormat::Text), "Deleted CNAME record 8");
    }

    #[test]
    fn test_non_json_body_passed_through() {
        let dispatched = sent(Action::Detail, Some(1), 200, "ok");
        assert_eq!(render(&dispatched, OutputFormat::Json), "ok");
    }

    #[test]
    fn test_dry_run_text() {
        let mut body = crate::fields::Payload::new();
        body.insert("ttl".to_string(), Value::from(60));
        let dispatched = Dispatched {
            dtype: "TXT",
            action: Action::Create,
            pk: None,
            outcome: Outcome::DryRun(
                ApiRequest::new(HttpMethod::Post, "/api/v1_dns/txt/").with_body(body),
            ),
        };
        assert_eq!(
            render(&dispatched, OutputFormat::Text),
            "DRY-RUN: POST /api/v1_dns/txt/\n{\n  \"ttl\": 60\n}"
        );
    }
}
