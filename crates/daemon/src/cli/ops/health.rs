use clap::Args;

use object_store::NoteStoreConfig;

#[derive(Args, Debug, Clone)]
pub struct Health;

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("Health check failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Health {
    type Error = HealthError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut lines = Vec::new();

        // 1. Check config directory
        lines.push("Config:".to_string());
        match ctx.app_state() {
            Ok(state) => {
                lines.push(format!("  directory:    {}", state.jotter_dir.display()));
                lines.push("  config.toml:  OK".to_string());
                let store = match &state.config.store {
                    NoteStoreConfig::Memory => "memory".to_string(),
                    NoteStoreConfig::Local { path } if path.is_dir() => {
                        format!("local ({})", path.display())
                    }
                    NoteStoreConfig::Local { path } => {
                        format!("local ({}, MISSING)", path.display())
                    }
                    NoteStoreConfig::S3 { bucket, .. } => format!("s3 ({})", bucket),
                };
                lines.push(format!("  store:        {}", store));
                lines.push(format!("  api_port:     {}", state.config.api_port));
                let classifier = match &state.config.classifier {
                    Some(classifier) => classifier.model.clone(),
                    None => "not configured".to_string(),
                };
                lines.push(format!("  classifier:   {}", classifier));
            }
            Err(e) => {
                lines.push(format!("  error: {}", e));
            }
        }

        // 2. Check daemon liveness
        let base = ctx.client.base_url();
        let client = ctx.client.http_client();

        lines.push(String::new());
        lines.push(format!("Daemon ({}):", base));

        for probe in ["livez", "readyz"] {
            let url = format!("{}/_status/{}", base.as_str().trim_end_matches('/'), probe);
            let status = match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => "OK".to_string(),
                Ok(resp) => format!("UNHEALTHY ({})", resp.status()),
                Err(_) => "NOT REACHABLE".to_string(),
            };
            lines.push(format!("  {:<7} {}", format!("{}:", probe), status));
        }

        Ok(lines.join("\n"))
    }
}
