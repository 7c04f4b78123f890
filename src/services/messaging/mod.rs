pub mod twilio;

use async_trait::async_trait;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()>;

    // stops at the first failed delivery
    async fn send_all(&self, to: &str, replies: &[String]) -> anyhow::Result<()> {
        for reply in replies {
            self.send_message(to, reply).await?;
        }
        Ok(())
    }
}
