use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::api::{AgentApi, ServerStatus, TweetLike, TweetPost, TweetReply};
use crate::wallet::{self, ChainClient};

// ========================= Core Types =========================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    PostTweet,
    PostTweetWithImage,
    ReplyToTweet,
    LikeTweet,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::PostTweet => "Post Tweet",
            ActionKind::PostTweetWithImage => "Post Tweet with Image",
            ActionKind::ReplyToTweet => "Reply to Tweet",
            ActionKind::LikeTweet => "Like Tweet",
        }
    }

    fn failure_prefix(&self) -> &'static str {
        match self {
            ActionKind::PostTweet => "Failed to post tweet",
            ActionKind::PostTweetWithImage => "Failed to post tweet with image",
            ActionKind::ReplyToTweet => "Failed to reply to tweet",
            ActionKind::LikeTweet => "Failed to like tweet",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletSession {
    pub account: String,
    pub balance: Option<f64>,
}

impl WalletSession {
    pub fn short_account(&self) -> String {
        if self.account.len() <= 10 {
            return self.account.clone();
        }
        let head = &self.account[..6];
        let tail = &self.account[self.account.len() - 4..];
        format!("{head}...{tail}")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub tx_hash: String,
    pub link: String,
}

#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum ConsoleError {
    #[error("network error: {0}")]
    Network(String),
    #[error("no wallet available")]
    WalletUnavailable,
    #[error("transaction rejected: {0}")]
    TransactionRejected(String),
    // The display string is what the log panel shows verbatim.
    #[error("Agent not started!")]
    AgentNotRunning,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ConsoleState {
    pub logs: Vec<String>,
    pub running: bool,
    pub active: Option<ActionKind>,
    pub agent_busy: bool,
    pub wallet: Option<WalletSession>,
    pub payment: Option<PaymentReceipt>,
    pub wallet_notice: Option<String>,
    pub install_url: Option<String>,
}

// ========================= Collaborator Seams =========================

#[async_trait]
pub trait Backend: Send + Sync {
    async fn server_status(&self) -> Result<ServerStatus, ConsoleError>;
    async fn balance(&self, account: &str) -> Result<f64, ConsoleError>;
    async fn start_agent(&self) -> Result<String, ConsoleError>;
    async fn stop_agent(&self) -> Result<String, ConsoleError>;
    async fn post_tweet(&self, prompt: &str) -> Result<TweetPost, ConsoleError>;
    async fn post_with_image(&self, prompt: &str) -> Result<TweetPost, ConsoleError>;
    async fn reply_to_tweet(&self) -> Result<TweetReply, ConsoleError>;
    async fn like_tweet(&self) -> Result<TweetLike, ConsoleError>;
}

#[async_trait]
pub trait Wallet: Send + Sync {
    async fn request_account(&self) -> Result<String, ConsoleError>;
    async fn pay(&self) -> Result<PaymentReceipt, ConsoleError>;
}

// ========================= Console Core =========================

pub struct Console<B, W>
where
    B: Backend,
    W: Wallet,
{
    backend: B,
    wallet: W,
    state: Arc<Mutex<ConsoleState>>,
}

impl<B, W> Console<B, W>
where
    B: Backend,
    W: Wallet,
{
    pub fn new(backend: B, wallet: W) -> Self {
        Self {
            backend,
            wallet,
            state: Arc::new(Mutex::new(ConsoleState::default())),
        }
    }

    pub async fn snapshot(&self) -> ConsoleState {
        self.state.lock().await.clone()
    }

    /// Runs one tweet action. A no-op while another tweet action is in
    /// flight; the slot is released on every exit path.
    pub async fn dispatch<F, Fut>(&self, kind: ActionKind, action: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), ConsoleError>>,
    {
        if !self.claim(kind).await {
            info!(action = kind.label(), "action already in flight, ignoring");
            return;
        }
        let result = action().await;
        self.settle(kind, result).await;
    }

    pub async fn post_tweet(&self, prompt: &str) {
        self.dispatch(ActionKind::PostTweet, || self.run_post(prompt))
            .await;
    }

    pub async fn post_with_image(&self, prompt: &str) {
        self.dispatch(ActionKind::PostTweetWithImage, || {
            self.run_post_with_image(prompt)
        })
        .await;
    }

    pub async fn reply_to_tweet(&self) {
        self.dispatch(ActionKind::ReplyToTweet, || self.run_reply()).await;
    }

    pub async fn like_tweet(&self) {
        self.dispatch(ActionKind::LikeTweet, || self.run_like()).await;
    }

    /// The pay-then-start gate. Payment is required once per session: after a
    /// confirmed transaction, later starts go straight to the backend.
    pub async fn start_stop(&self) {
        let running = {
            let mut st = self.state.lock().await;
            if st.agent_busy {
                return;
            }
            st.agent_busy = true;
            st.wallet_notice = None;
            st.running
        };
        if running {
            self.stop().await;
        } else {
            self.start().await;
        }
        self.state.lock().await.agent_busy = false;
    }

    pub async fn connect_wallet(&self) {
        self.state.lock().await.wallet_notice = None;
        let account = match self.wallet.request_account().await {
            Ok(account) => account,
            Err(ConsoleError::WalletUnavailable) => {
                info!("no wallet reachable, pointing at the download page");
                let mut st = self.state.lock().await;
                st.install_url = Some(wallet::WALLET_DOWNLOAD_URL.into());
                return;
            }
            Err(err) => {
                warn!("wallet connection failed: {err}");
                self.state.lock().await.wallet_notice = Some("Wallet connection failed.".into());
                return;
            }
        };
        info!(account = %account, "wallet connected");
        self.state.lock().await.wallet = Some(WalletSession {
            account: account.clone(),
            balance: None,
        });
        match self.backend.balance(&account).await {
            Ok(balance) => {
                let mut st = self.state.lock().await;
                if let Some(session) = st.wallet.as_mut() {
                    session.balance = Some(balance);
                }
            }
            Err(err) => {
                // Keep the account; the view renders an error mark for the balance.
                warn!("balance fetch failed: {err}");
                self.state.lock().await.wallet_notice = Some("Wallet connection failed.".into());
            }
        }
    }

    /// Picks up an agent that is already running, e.g. after the panel is
    /// reopened while the backend kept going.
    pub async fn refresh_status(&self) {
        match self.backend.server_status().await {
            Ok(status) => {
                info!(agent = ?status.agent, running = status.agent_running, "agent status");
                self.state.lock().await.running = status.agent_running;
            }
            Err(err) => warn!("status check failed: {err}"),
        }
    }

    async fn start(&self) {
        let paid = self.state.lock().await.payment.is_some();
        if !paid {
            match self.wallet.pay().await {
                Ok(receipt) => {
                    info!(hash = %receipt.tx_hash, "payment confirmed");
                    let mut st = self.state.lock().await;
                    st.logs.push(format!("✅ Transaction confirmed: {}", receipt.link));
                    st.payment = Some(receipt);
                }
                Err(err) => {
                    warn!("payment failed: {err}");
                    let mut st = self.state.lock().await;
                    if matches!(err, ConsoleError::WalletUnavailable) {
                        st.install_url = Some(wallet::WALLET_DOWNLOAD_URL.into());
                        st.wallet_notice =
                            Some("No wallet found. Install one to authorize the payment.".into());
                    } else {
                        st.wallet_notice =
                            Some("Transaction failed or canceled. Please try again.".into());
                    }
                    st.logs.push(format!("Failed to start agent: {err}"));
                    return;
                }
            }
        }
        match self.backend.start_agent().await {
            Ok(message) => {
                let mut st = self.state.lock().await;
                st.running = true;
                st.logs.push(message);
            }
            Err(err) => {
                warn!("start failed: {err}");
                self.state
                    .lock()
                    .await
                    .logs
                    .push(format!("Failed to start agent: {err}"));
            }
        }
    }

    async fn stop(&self) {
        match self.backend.stop_agent().await {
            Ok(message) => {
                let mut st = self.state.lock().await;
                st.running = false;
                st.logs.push(format!("🛑 {message}"));
            }
            Err(err) => {
                // The request counts as attempted; running is left as the
                // backend response dictates.
                warn!("stop failed: {err}");
                self.state
                    .lock()
                    .await
                    .logs
                    .push(format!("Failed to stop agent: {err}"));
            }
        }
    }

    async fn run_post(&self, prompt: &str) -> Result<(), ConsoleError> {
        self.ensure_running().await?;
        let out = self.backend.post_tweet(prompt).await?;
        let mut st = self.state.lock().await;
        st.logs.push(out.tweet_text);
        st.logs.push(out.message);
        Ok(())
    }

    async fn run_post_with_image(&self, prompt: &str) -> Result<(), ConsoleError> {
        self.ensure_running().await?;
        let out = self.backend.post_with_image(prompt).await?;
        let mut st = self.state.lock().await;
        st.logs.push(out.tweet_text);
        st.logs.push(out.message);
        Ok(())
    }

    async fn run_reply(&self) -> Result<(), ConsoleError> {
        self.ensure_running().await?;
        let out = self.backend.reply_to_tweet().await?;
        let mut st = self.state.lock().await;
        st.logs.push(out.timeline.to_string());
        st.logs.push(out.reply_text);
        st.logs.push(out.message);
        Ok(())
    }

    async fn run_like(&self) -> Result<(), ConsoleError> {
        self.ensure_running().await?;
        let out = self.backend.like_tweet().await?;
        let mut st = self.state.lock().await;
        st.logs.push(out.timeline.to_string());
        st.logs.push(out.message);
        Ok(())
    }

    // Checked client-side so a stopped agent costs no network round trip.
    async fn ensure_running(&self) -> Result<(), ConsoleError> {
        if self.state.lock().await.running {
            Ok(())
        } else {
            Err(ConsoleError::AgentNotRunning)
        }
    }

    async fn claim(&self, kind: ActionKind) -> bool {
        let mut st = self.state.lock().await;
        if st.active.is_some() {
            return false;
        }
        st.active = Some(kind);
        true
    }

    async fn settle(&self, kind: ActionKind, result: Result<(), ConsoleError>) {
        let mut st = self.state.lock().await;
        st.active = None;
        match result {
            Ok(()) => {}
            Err(ConsoleError::AgentNotRunning) => {
                st.logs.push(ConsoleError::AgentNotRunning.to_string());
            }
            Err(err) => {
                warn!(action = kind.label(), "action failed: {err}");
                st.logs.push(format!("{}: {}", kind.failure_prefix(), err));
            }
        }
    }
}

// ========================= HTTP Backend Adapter =========================

pub struct ApiBackend {
    api: AgentApi,
}

impl ApiBackend {
    pub fn new(api: AgentApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Backend for ApiBackend {
    async fn server_status(&self) -> Result<ServerStatus, ConsoleError> {
        self.api
            .server_status()
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))
    }

    async fn balance(&self, account: &str) -> Result<f64, ConsoleError> {
        self.api
            .balance(account)
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))
    }

    async fn start_agent(&self) -> Result<String, ConsoleError> {
        self.api
            .start_agent()
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))
    }

    async fn stop_agent(&self) -> Result<String, ConsoleError> {
        self.api
            .stop_agent()
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))
    }

    async fn post_tweet(&self, prompt: &str) -> Result<TweetPost, ConsoleError> {
        self.api
            .post_tweet(prompt)
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))
    }

    async fn post_with_image(&self, prompt: &str) -> Result<TweetPost, ConsoleError> {
        self.api
            .post_with_image(prompt)
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))
    }

    async fn reply_to_tweet(&self) -> Result<TweetReply, ConsoleError> {
        self.api
            .reply_to_tweet()
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))
    }

    async fn like_tweet(&self) -> Result<TweetLike, ConsoleError> {
        self.api
            .like_tweet()
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))
    }
}

// ========================= Chain Wallet Adapter =========================

pub struct SonicWallet {
    chain: ChainClient,
}

impl SonicWallet {
    pub fn new(chain: ChainClient) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl Wallet for SonicWallet {
    async fn request_account(&self) -> Result<String, ConsoleError> {
        if !self.chain.has_wallet() {
            return Err(ConsoleError::WalletUnavailable);
        }
        let accounts = self
            .chain
            .request_accounts()
            .await
            .map_err(|e| ConsoleError::Network(e.to_string()))?;
        accounts
            .into_iter()
            .next()
            .ok_or(ConsoleError::WalletUnavailable)
    }

    async fn pay(&self) -> Result<PaymentReceipt, ConsoleError> {
        if !self.chain.has_wallet() {
            return Err(ConsoleError::WalletUnavailable);
        }
        let account = self.request_account().await?;
        let hash = self
            .chain
            .send_payment(&account)
            .await
            .map_err(|e| ConsoleError::TransactionRejected(e.to_string()))?;
        self.chain
            .wait_for_receipt(&hash)
            .await
            .map_err(|e| ConsoleError::TransactionRejected(e.to_string()))?;
        Ok(PaymentReceipt {
            link: ChainClient::explorer_link(&hash),
            tx_hash: hash,
        })
    }
}

// ========================= Tests =========================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    #[derive(Clone, Default)]
    struct FakeBackend {
        calls: Arc<StdMutex<Vec<&'static str>>>,
        gate: Option<Arc<Notify>>,
        fail_posts: bool,
        fail_start: bool,
        agent_running: bool,
    }

    impl FakeBackend {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, name: &str) -> usize {
            self.calls().iter().filter(|&&c| c == name).count()
        }
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn server_status(&self) -> Result<ServerStatus, ConsoleError> {
            self.calls.lock().unwrap().push("status");
            Ok(ServerStatus {
                status: "running".into(),
                agent: Some("social_agent".into()),
                agent_running: self.agent_running,
            })
        }

        async fn balance(&self, _account: &str) -> Result<f64, ConsoleError> {
            self.calls.lock().unwrap().push("balance");
            Ok(12.345)
        }

        async fn start_agent(&self) -> Result<String, ConsoleError> {
            self.calls.lock().unwrap().push("start");
            if self.fail_start {
                return Err(ConsoleError::Network("agent api error 400".into()));
            }
            Ok("Agent started".into())
        }

        async fn stop_agent(&self) -> Result<String, ConsoleError> {
            self.calls.lock().unwrap().push("stop");
            Ok("Agent stopped".into())
        }

        async fn post_tweet(&self, prompt: &str) -> Result<TweetPost, ConsoleError> {
            self.calls.lock().unwrap().push("post-tweet");
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail_posts {
                return Err(ConsoleError::Network("agent api error 500".into()));
            }
            Ok(TweetPost {
                tweet_text: format!("{prompt}!"),
                message: "ok".into(),
            })
        }

        async fn post_with_image(&self, prompt: &str) -> Result<TweetPost, ConsoleError> {
            self.calls.lock().unwrap().push("post-with-image");
            Ok(TweetPost {
                tweet_text: format!("{prompt}!"),
                message: "ok".into(),
            })
        }

        async fn reply_to_tweet(&self) -> Result<TweetReply, ConsoleError> {
            self.calls.lock().unwrap().push("reply");
            Ok(TweetReply {
                timeline: json!([{"id": "1", "text": "gm"}]),
                reply_text: "hey".into(),
                message: "replied".into(),
            })
        }

        async fn like_tweet(&self) -> Result<TweetLike, ConsoleError> {
            self.calls.lock().unwrap().push("like");
            Ok(TweetLike {
                timeline: json!([{"id": "1", "text": "gm"}]),
                message: "liked".into(),
            })
        }
    }

    #[derive(Clone, Default)]
    struct FakeWallet {
        pays: Arc<StdMutex<usize>>,
        unavailable: bool,
        reject: bool,
    }

    impl FakeWallet {
        fn pay_count(&self) -> usize {
            *self.pays.lock().unwrap()
        }
    }

    #[async_trait]
    impl Wallet for FakeWallet {
        async fn request_account(&self) -> Result<String, ConsoleError> {
            if self.unavailable {
                return Err(ConsoleError::WalletUnavailable);
            }
            Ok("0x1234567890abcdef1234567890abcdef12345678".into())
        }

        async fn pay(&self) -> Result<PaymentReceipt, ConsoleError> {
            *self.pays.lock().unwrap() += 1;
            if self.unavailable {
                return Err(ConsoleError::WalletUnavailable);
            }
            if self.reject {
                return Err(ConsoleError::TransactionRejected("user denied".into()));
            }
            Ok(PaymentReceipt {
                tx_hash: "0xabc123".into(),
                link: "https://testnet.sonicscan.org/tx/0xabc123".into(),
            })
        }
    }

    fn console(backend: FakeBackend, wallet: FakeWallet) -> Console<FakeBackend, FakeWallet> {
        Console::new(backend, wallet)
    }

    async fn started(backend: FakeBackend, wallet: FakeWallet) -> Console<FakeBackend, FakeWallet> {
        let console = console(backend, wallet);
        console.start_stop().await;
        assert!(console.snapshot().await.running);
        console
    }

    #[tokio::test]
    async fn only_first_action_dispatches_while_pending() {
        let gate = Arc::new(Notify::new());
        let backend = FakeBackend {
            gate: Some(gate.clone()),
            ..Default::default()
        };
        let console = Arc::new(started(backend.clone(), FakeWallet::default()).await);

        let first = {
            let console = console.clone();
            tokio::spawn(async move { console.post_tweet("one").await })
        };
        tokio::task::yield_now().await;
        assert_eq!(
            console.snapshot().await.active,
            Some(ActionKind::PostTweet)
        );

        // Second and third clicks land while the first is pending.
        console.post_tweet("two").await;
        console.like_tweet().await;
        assert_eq!(backend.count("post-tweet"), 1);
        assert_eq!(backend.count("like"), 0);

        gate.notify_one();
        first.await.unwrap();
        let state = console.snapshot().await;
        assert_eq!(state.active, None);
        assert_eq!(backend.count("post-tweet"), 1);
    }

    #[tokio::test]
    async fn start_without_payment_never_reaches_backend() {
        let backend = FakeBackend::default();
        let wallet = FakeWallet {
            reject: true,
            ..Default::default()
        };
        let console = console(backend.clone(), wallet.clone());

        console.start_stop().await;

        let state = console.snapshot().await;
        assert!(!state.running);
        assert_eq!(backend.count("start"), 0);
        assert_eq!(wallet.pay_count(), 1);
        assert_eq!(
            state.wallet_notice.as_deref(),
            Some("Transaction failed or canceled. Please try again.")
        );
        assert_eq!(
            state.logs.last().map(String::as_str),
            Some("Failed to start agent: transaction rejected: user denied")
        );
    }

    #[tokio::test]
    async fn payment_confirmation_precedes_start_message() {
        let backend = FakeBackend::default();
        let console = started(backend.clone(), FakeWallet::default()).await;

        let state = console.snapshot().await;
        assert_eq!(
            state.logs,
            vec![
                "✅ Transaction confirmed: https://testnet.sonicscan.org/tx/0xabc123".to_string(),
                "Agent started".to_string(),
            ]
        );
        assert!(state.payment.is_some());
        assert_eq!(backend.count("start"), 1);
    }

    #[tokio::test]
    async fn stop_calls_backend_once_and_prefixes_message() {
        let backend = FakeBackend::default();
        let console = started(backend.clone(), FakeWallet::default()).await;

        console.start_stop().await;

        let state = console.snapshot().await;
        assert!(!state.running);
        assert_eq!(backend.count("stop"), 1);
        assert_eq!(state.logs.last().map(String::as_str), Some("🛑 Agent stopped"));
    }

    #[tokio::test]
    async fn tweet_action_while_stopped_makes_no_network_call() {
        let backend = FakeBackend::default();
        let console = console(backend.clone(), FakeWallet::default());

        console.post_tweet("hello").await;

        let state = console.snapshot().await;
        assert_eq!(state.logs, vec!["Agent not started!".to_string()]);
        assert!(backend.calls().is_empty());
        assert_eq!(state.active, None);
    }

    #[tokio::test]
    async fn posting_hello_appends_exactly_two_entries() {
        let console = started(FakeBackend::default(), FakeWallet::default()).await;
        let before = console.snapshot().await.logs.len();

        console.post_tweet("hello").await;

        let state = console.snapshot().await;
        assert_eq!(&state.logs[before..], &["hello!", "ok"]);
        assert_eq!(state.active, None);
    }

    #[tokio::test]
    async fn missing_wallet_points_at_download_page() {
        let backend = FakeBackend::default();
        let wallet = FakeWallet {
            unavailable: true,
            ..Default::default()
        };
        let console = console(backend.clone(), wallet);

        console.start_stop().await;

        let state = console.snapshot().await;
        assert!(!state.running);
        assert_eq!(state.install_url.as_deref(), Some(wallet::WALLET_DOWNLOAD_URL));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_action_releases_the_slot() {
        let backend = FakeBackend {
            fail_posts: true,
            ..Default::default()
        };
        let console = started(backend.clone(), FakeWallet::default()).await;

        console.post_tweet("oops").await;

        let state = console.snapshot().await;
        assert_eq!(state.active, None);
        assert_eq!(
            state.logs.last().map(String::as_str),
            Some("Failed to post tweet: network error: agent api error 500")
        );

        // The next action is dispatched normally.
        console.post_tweet("again").await;
        assert_eq!(backend.count("post-tweet"), 2);
    }

    #[tokio::test]
    async fn payment_is_required_once_per_session() {
        let backend = FakeBackend::default();
        let wallet = FakeWallet::default();
        let console = started(backend.clone(), wallet.clone()).await;

        console.start_stop().await; // stop
        console.start_stop().await; // start again, no new payment

        let state = console.snapshot().await;
        assert!(state.running);
        assert_eq!(wallet.pay_count(), 1);
        assert_eq!(backend.count("start"), 2);
    }

    #[tokio::test]
    async fn start_failure_stays_stopped_after_payment() {
        let backend = FakeBackend {
            fail_start: true,
            ..Default::default()
        };
        let console = console(backend.clone(), FakeWallet::default());

        console.start_stop().await;

        let state = console.snapshot().await;
        assert!(!state.running);
        assert!(state.payment.is_some());
        assert_eq!(
            state.logs.last().map(String::as_str),
            Some("Failed to start agent: network error: agent api error 400")
        );
    }

    #[tokio::test]
    async fn connect_wallet_stores_session_and_balance() {
        let backend = FakeBackend::default();
        let console = console(backend.clone(), FakeWallet::default());

        console.connect_wallet().await;

        let state = console.snapshot().await;
        let session = state.wallet.expect("session");
        assert_eq!(session.balance, Some(12.345));
        assert_eq!(session.short_account(), "0x1234...5678");
        assert_eq!(backend.count("balance"), 1);
    }

    #[tokio::test]
    async fn connect_without_wallet_sets_install_url() {
        let wallet = FakeWallet {
            unavailable: true,
            ..Default::default()
        };
        let console = console(FakeBackend::default(), wallet);

        console.connect_wallet().await;

        let state = console.snapshot().await;
        assert!(state.wallet.is_none());
        assert_eq!(state.install_url.as_deref(), Some(wallet::WALLET_DOWNLOAD_URL));
    }

    #[tokio::test]
    async fn reply_appends_timeline_reply_and_message() {
        let console = started(FakeBackend::default(), FakeWallet::default()).await;
        let before = console.snapshot().await.logs.len();

        console.reply_to_tweet().await;

        let state = console.snapshot().await;
        assert_eq!(
            &state.logs[before..],
            &[r#"[{"id":"1","text":"gm"}]"#, "hey", "replied"]
        );
    }

    #[tokio::test]
    async fn refresh_status_adopts_running_agent() {
        let backend = FakeBackend {
            agent_running: true,
            ..Default::default()
        };
        let console = console(backend, FakeWallet::default());

        console.refresh_status().await;

        assert!(console.snapshot().await.running);
    }
}
