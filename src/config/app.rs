use anyhow::Result;
use std::env;

/// When cached training-hours totals are recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputePolicy {
    /// Recompute every user row inline while rendering the admin list.
    OnRender,
    /// Recompute attendees on every session save, with a monthly batch job
    /// catching drift such as month rollover.
    OnSave,
}

impl RecomputePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "on_render" => Some(RecomputePolicy::OnRender),
            "on_save" => Some(RecomputePolicy::OnSave),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecomputePolicy::OnRender => "on_render",
            RecomputePolicy::OnSave => "on_save",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub recompute_policy: RecomputePolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string());
        let recompute_policy = env::var("RECOMPUTE_POLICY")
            .ok()
            .and_then(|s| RecomputePolicy::from_str(&s))
            .unwrap_or(RecomputePolicy::OnSave);

        Ok(AppConfig {
            host,
            port,
            jwt_secret,
            recompute_policy,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
