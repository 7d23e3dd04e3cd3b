use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "providers": {
                "type": "object",
                "required": ["primary"],
                "properties": {
                    "primary": { "$ref": "#/$defs/provider" },
                    "secondary": { "$ref": "#/$defs/provider" },
                    "sentiment": { "$ref": "#/$defs/provider" },
                    "fallback_policy": { "type": "string", "enum": ["any_error", "quota_only"] },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "research": {
                "type": "object",
                "properties": {
                    "enabled": { "type": "boolean" },
                    "jina_base_url": { "type": "string", "format": "uri" },
                    "max_context_chars": { "type": "integer", "minimum": 1 },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "cache": {
                "type": "object",
                "properties": {
                    "enabled": { "type": "boolean" },
                    "backend": { "type": "string", "enum": ["memory", "database"] },
                    "ttl_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "server": {
                "type": "object",
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 },
                    "db": { "type": "string" }
                }
            }
        },
        "$defs": {
            "provider": {
                "type": "object",
                "required": ["provider"],
                "properties": {
                    "provider": { "type": "string", "enum": ["gemini", "perplexity"] },
                    "model": { "type": "string" },
                    "api_key": { "type": "string" },
                    "base_url": { "type": "string" }
                }
            }
        }
    })
});
