use anyhow::{anyhow, bail, Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

pub const PAYMENT_RECIPIENT: &str = "0x039e2fB66102314Ce7b64Ce5Ce3E5183bc94aD38";
pub const PAYMENT_AMOUNT_WEI: u128 = 1_000_000_000_000_000_000; // one native S
pub const PAYMENT_GAS_LIMIT: u64 = 40_000;
pub const PAYMENT_GAS_PRICE_WEI: u128 = 1_100_000_000; // 1.1 gwei
pub const EXPLORER_TX_BASE: &str = "https://testnet.sonicscan.org/tx/";
pub const WALLET_DOWNLOAD_URL: &str = "https://frame.sh";

#[derive(Clone)]
pub struct ChainConfig {
    pub wallet_rpc: Option<String>, // signing-capable endpoint, e.g. a local Frame instance
    pub fallback_rpc: String,       // public endpoint, reads only
    pub receipt_poll_ms: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            wallet_rpc: env::var("SONIC_WALLET_RPC")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            fallback_rpc: "https://rpc.blaze.soniclabs.com".into(),
            receipt_poll_ms: 2_000,
        }
    }
}

#[derive(Clone)]
pub struct ChainClient {
    http: Client,
    cfg: ChainConfig,
}

impl ChainClient {
    pub fn new(cfg: ChainConfig) -> Self {
        Self {
            http: Client::new(),
            cfg,
        }
    }

    pub fn has_wallet(&self) -> bool {
        self.cfg.wallet_rpc.is_some()
    }

    fn endpoint(&self) -> &str {
        self.cfg
            .wallet_rpc
            .as_deref()
            .unwrap_or(&self.cfg.fallback_rpc)
    }

    fn wallet_endpoint(&self) -> Result<&str> {
        self.cfg
            .wallet_rpc
            .as_deref()
            .ok_or_else(|| anyhow!("no wallet endpoint configured"))
    }

    pub fn explorer_link(hash: &str) -> String {
        format!("{EXPLORER_TX_BASE}{hash}")
    }

    pub async fn request_accounts(&self) -> Result<Vec<String>> {
        let url = self.wallet_endpoint()?.to_string();
        let result = self.rpc(&url, "eth_requestAccounts", json!([])).await?;
        let accounts: Vec<String> =
            serde_json::from_value(result).context("malformed eth_requestAccounts result")?;
        Ok(accounts)
    }

    pub async fn send_payment(&self, from: &str) -> Result<String> {
        // The fallback endpoint holds no keys, so signing must go through the wallet.
        let url = self.wallet_endpoint()?.to_string();
        let tx = json!({
            "from": from,
            "to": PAYMENT_RECIPIENT,
            "value": format!("{:#x}", PAYMENT_AMOUNT_WEI),
            "gas": format!("{:#x}", PAYMENT_GAS_LIMIT),
            "gasPrice": format!("{:#x}", PAYMENT_GAS_PRICE_WEI),
        });
        let result = self.rpc(&url, "eth_sendTransaction", json!([tx])).await?;
        let hash = result
            .as_str()
            .ok_or_else(|| anyhow!("wallet returned no transaction hash"))?
            .to_string();
        info!(hash = %hash, "payment submitted");
        Ok(hash)
    }

    // Waits for one confirmation. No deadline of its own; the surrounding UI
    // imposes none either.
    pub async fn wait_for_receipt(&self, hash: &str) -> Result<()> {
        loop {
            let receipt = self
                .rpc(self.endpoint(), "eth_getTransactionReceipt", json!([hash]))
                .await?;
            if !receipt.is_null() {
                let ok = receipt.get("status").and_then(|s| s.as_str()) == Some("0x1");
                if ok {
                    info!(hash = %hash, "payment confirmed");
                    return Ok(());
                }
                bail!("transaction {} reverted on chain", hash);
            }
            sleep(Duration::from_millis(self.cfg.receipt_poll_ms)).await;
        }
    }

    async fn rpc(&self, url: &str, method: &str, params: Value) -> Result<Value> {
        let req = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let resp = self.http.post(url).json(&req).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            bail!("rpc error {}: {}", status, text);
        }
        let v: Value = serde_json::from_str(&text).context("failed to parse rpc response JSON")?;
        if let Some(err) = v.get("error") {
            let msg = err
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown rpc error");
            bail!("{} rejected: {}", method, msg);
        }
        Ok(v.get("result").cloned().unwrap_or(Value::Null))
    }
}
