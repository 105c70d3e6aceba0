use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;

#[derive(Clone)]
pub struct ApiConfig {
    pub base_url: String, // e.g. "http://localhost:8001"
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("AGENT_API_URL").unwrap_or_else(|_| "http://localhost:8001".into()),
        }
    }
}

#[derive(Clone)]
pub struct AgentApi {
    http: Client,
    cfg: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerStatus {
    pub status: String,
    pub agent: Option<String>,
    pub agent_running: bool,
}

#[derive(Debug, Deserialize)]
struct AgentMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SonicBalance {
    balance: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetPost {
    pub tweet_text: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetReply {
    pub timeline: Value,
    pub reply_text: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TweetLike {
    pub timeline: Value,
    pub message: String,
}

impl AgentApi {
    pub fn new(cfg: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            cfg,
        }
    }

    pub async fn server_status(&self) -> Result<ServerStatus> {
        self.get("/").await
    }

    pub async fn balance(&self, account: &str) -> Result<f64> {
        let path = format!("/connections/sonic/balance?account={account}");
        let resp: SonicBalance = self.get(&path).await?;
        Ok(resp.balance)
    }

    pub async fn start_agent(&self) -> Result<String> {
        let resp: AgentMessage = self.post("/agent/start", None).await?;
        Ok(resp.message)
    }

    pub async fn stop_agent(&self) -> Result<String> {
        let resp: AgentMessage = self.post("/agent/stop", None).await?;
        Ok(resp.message)
    }

    pub async fn post_tweet(&self, prompt: &str) -> Result<TweetPost> {
        self.post("/agent/post-tweet", Some(json!({ "prompt": prompt })))
            .await
    }

    pub async fn post_with_image(&self, prompt: &str) -> Result<TweetPost> {
        self.post("/agent/post-with-image", Some(json!({ "prompt": prompt })))
            .await
    }

    pub async fn reply_to_tweet(&self) -> Result<TweetReply> {
        self.post("/agent/reply-to-tweet", None).await
    }

    pub async fn like_tweet(&self) -> Result<TweetLike> {
        self.post("/agent/like-tweet", None).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.cfg.base_url, path);
        let resp = self.http.get(url).send().await?;
        Self::decode(resp).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> Result<T> {
        let url = format!("{}{}", self.cfg.base_url, path);
        let mut req = self.http.post(url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send().await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            bail!("agent api error {}: {}", status, text);
        }
        let v: Value = serde_json::from_str(&text).context("failed to parse agent api JSON")?;
        // The server reports some failures (e.g. tweet-interval throttling) as a
        // 200 with a status field instead of an HTTP error.
        if let Some(s) = v.get("status").and_then(|x| x.as_str()) {
            if s == "failed" || s == "error" {
                let msg = v
                    .get("message")
                    .and_then(|x| x.as_str())
                    .unwrap_or("agent action failed");
                bail!("{}", msg);
            }
        }
        serde_json::from_value(v).context("unexpected agent api response shape")
    }
}
