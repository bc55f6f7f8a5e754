use crate::registry::NodeDescriptor;
use crate::slug::slugify;
use serde_json::{Value, json};

/// Example `parameters` for the tested node, keyed by fully qualified type.
///
/// Unknown types get a generic placeholder so the generated workflow still applies.
pub fn example_parameters(descriptor: &NodeDescriptor) -> Value {
    match descriptor.node_type.as_str() {
        "n8n-nodes-base.webhook" => json!({
            "path": format!("test-{}", slugify(&descriptor.name)),
            "httpMethod": "POST",
            "responseMode": "onReceived"
        }),
        "n8n-nodes-base.code" => json!({
            "mode": "runOnceForAllItems",
            "jsCode": "// Process data\nconst items = $input.all();\nreturn items.map(item => ({\n  json: {\n    ...item.json,\n    processed: true,\n    timestamp: new Date().toISOString()\n  }\n}));"
        }),
        "n8n-nodes-base.if" => json!({
            "conditions": {
                "boolean": [{ "value1": "={{ $json.isValid }}", "value2": true }]
            }
        }),
        "n8n-nodes-base.switch" => json!({
            "mode": "rules",
            "rules": {
                "values": [
                    { "value": "={{ $json.type === \"A\" }}" },
                    { "value": "={{ $json.type === \"B\" }}" }
                ]
            }
        }),
        "n8n-nodes-base.set" => json!({
            "mode": "manual",
            "fields": {
                "values": [{ "name": "output", "type": "string", "value": "={{ $json }}" }]
            }
        }),
        "n8n-nodes-base.merge" => json!({
            "mode": "combine",
            "mergeByFields": { "values": [{ "field1": "id", "field2": "id" }] }
        }),
        "n8n-nodes-base.httpRequest" => json!({
            "method": "GET",
            "url": "https://httpbin.org/get",
            "authentication": "none",
            "options": {}
        }),
        "n8n-nodes-base.schedule" | "n8n-nodes-base.scheduleTrigger" => json!({
            "rule": { "interval": [{ "field": "hours", "hoursInterval": 1 }] }
        }),
        "n8n-nodes-base.manualTrigger" => json!({}),
        _ => json!({ "note": format!("Configure {} parameters here", descriptor.name) }),
    }
}
