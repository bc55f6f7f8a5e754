//! The companion files written next to every generated workflow.
use super::hcl::quote;
use crate::registry::NodeDescriptor;
use crate::slug::slugify;
use crate::topology::PortTopology;
use itertools::Itertools;
use std::fmt;

/// File holding the serialized workflow. Coverage discovery looks for this name.
pub const WORKFLOW_FILE: &str = "main.tf";
pub const VARIABLES_FILE: &str = "variables.tf";
pub const README_FILE: &str = "README.md";

/// Provider variable declarations. Identical for every descriptor.
pub fn variables_tf(default_base_url: &str) -> String {
    format!(
        r#"# Variables for node test workflow

variable "n8n_base_url" {{
  description = "Base URL of the n8n instance"
  type        = string
  default     = {}
}}

variable "n8n_api_key" {{
  description = "API key for n8n authentication"
  type        = string
  sensitive   = true
}}
"#,
        quote(default_base_url)
    )
}

/// Human-readable summary of a descriptor and the harness built for it.
pub fn readme(descriptor: &NodeDescriptor, topology: &PortTopology) -> String {
    Readme {
        descriptor,
        topology,
    }
    .to_string()
}

struct Readme<'a> {
    descriptor: &'a NodeDescriptor,
    topology: &'a PortTopology,
}

impl fmt::Display for Readme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptor = self.descriptor;
        let topology = self.topology;
        let name = &descriptor.name;
        let is_trigger = descriptor.is_trigger();

        writeln!(f, "# {} Node Test\n", name)?;
        writeln!(f, "**Category**: {}", descriptor.category)?;
        writeln!(f, "**Type**: `{}`", descriptor.node_type)?;
        if let Some(version) = descriptor.latest_version {
            writeln!(f, "**Latest Version**: {}", version)?;
        }

        writeln!(f, "\n## Description\n")?;
        match &descriptor.description {
            Some(description) => writeln!(f, "{}", description)?,
            None => writeln!(f, "Test workflow for the {} node.", name)?,
        }

        writeln!(f, "\n## Node Information\n")?;
        if descriptor.inputs.is_empty() || is_trigger {
            writeln!(f, "- **Inputs**: None (Trigger node)")?;
        } else {
            writeln!(f, "- **Inputs**: {}", descriptor.inputs.join(", "))?;
        }
        writeln!(f, "- **Outputs**: {}", descriptor.outputs.join(", "))?;
        if let Some(file) = &descriptor.source_file {
            writeln!(f, "- **File**: `{}`", file)?;
        }

        writeln!(f, "\n## Tested Ports\n")?;
        for port in &topology.inputs {
            writeln!(f, "- Input {}", port.description)?;
        }
        for port in &topology.outputs {
            writeln!(f, "- Output {}", port.description)?;
        }
        if let Some(summary) = &topology.summary {
            writeln!(f, "\n{}", summary)?;
        }

        writeln!(f, "\n## Workflow Structure\n")?;
        writeln!(f, "```\n{}\n```", structure_line(name, topology))?;

        writeln!(f, "\n## Usage\n")?;
        writeln!(f, "### 1. Initialize Terraform\n")?;
        writeln!(f, "```bash\nterraform init\n```\n")?;
        writeln!(f, "### 2. Plan\n")?;
        writeln!(f, "```bash\nterraform plan -var=\"n8n_api_key=YOUR_API_KEY\"\n```\n")?;
        writeln!(f, "### 3. Apply\n")?;
        writeln!(f, "```bash\nterraform apply -var=\"n8n_api_key=YOUR_API_KEY\"\n```\n")?;
        writeln!(f, "### 4. Test in n8n\n")?;
        writeln!(f, "1. Open the workflow in n8n UI")?;
        if is_trigger {
            writeln!(f, "2. Trigger the workflow (webhook, schedule, etc.)")?;
        } else {
            writeln!(f, "2. Click \"Execute Workflow\"")?;
        }
        writeln!(f, "3. Check the result in each output node")?;

        writeln!(f, "\n## Customization\n")?;
        writeln!(
            f,
            "Edit the `parameters` in `main.tf` to customize the {} node behavior.\n",
            name
        )?;
        writeln!(
            f,
            "See [n8n {} documentation](https://docs.n8n.io/integrations/builtin/core-nodes/n8n-nodes-base.{}/) for available parameters.",
            name,
            slugify(name)
        )?;

        writeln!(f, "\n## Notes\n")?;
        if is_trigger {
            writeln!(f, "- This is a trigger node, so it doesn't need an input")?;
            writeln!(
                f,
                "- The workflow will be triggered by {} events",
                name.to_lowercase()
            )
        } else {
            writeln!(f, "- This workflow uses manual triggers as input stubs for testing")?;
            writeln!(f, "- In production, replace them with appropriate trigger nodes")
        }
    }
}

/// One-line sketch such as `Input 1 + Input 2 → Merge → Output: Main`.
fn structure_line(name: &str, topology: &PortTopology) -> String {
    let outputs = topology
        .outputs
        .iter()
        .map(|p| format!("Output: {}", p.name))
        .join(" | ");
    if topology.inputs.is_empty() {
        format!("{} → {}", name, outputs)
    } else {
        let inputs = topology.inputs.iter().map(|p| p.name.as_str()).join(" + ");
        format!("{} → {} → {}", inputs, name, outputs)
    }
}
