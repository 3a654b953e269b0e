use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::MailConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};

/// 발송할 메일 한 통
#[derive(Debug, Clone, Serialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// 메일 발송기
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> AppResult<()>;
}

/// 설정에 따라 발송기를 고릅니다.
pub fn mailer_from_config(config: &MailConfig) -> AppResult<Arc<dyn Mailer>> {
    match &config.api_url {
        Some(_) => Ok(Arc::new(HttpMailer::new(config.clone())?)),
        None => {
            log::warn!("MAIL_API_URL not set, reset mails will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// HTTP 메일 릴레이 발송기
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("메일 클라이언트 생성 실패")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        let url = self
            .config
            .api_url
            .as_deref()
            .ok_or_else(|| AppError::InternalError("메일 릴레이 주소가 없습니다".to_string()))?;

        let payload = RelayRequest {
            from: &self.config.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
        };

        let mut request = self.client.post(url).json(&payload);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("메일 릴레이 호출 실패")?;

        if !response.status().is_success() {
            return Err(AppError::InternalError(format!(
                "메일 릴레이 응답 오류: {}",
                response.status()
            )));
        }

        log::info!("재설정 메일 발송 완료: {}", message.to);
        Ok(())
    }
}

/// 메일 내용을 로그로만 남기는 발송기
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        log::info!(
            "메일 발송 (로그 전용) to={} subject={:?}\n{}",
            message.to,
            message.subject,
            message.text
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: Option<&str>) -> MailConfig {
        MailConfig {
            api_url: api_url.map(str::to_string),
            api_key: None,
            from: "no-reply@localhost".to_string(),
            timeout_secs: 1,
        }
    }

    #[actix_web::test]
    async fn test_log_mailer_always_succeeds() {
        let message = MailMessage {
            to: "a@x.com".to_string(),
            subject: "subject".to_string(),
            text: "body".to_string(),
        };

        assert!(LogMailer.send(message).await.is_ok());
    }

    #[test]
    fn test_mailer_from_config_without_url() {
        assert!(mailer_from_config(&config(None)).is_ok());
    }

    #[test]
    fn test_mailer_from_config_with_url() {
        assert!(mailer_from_config(&config(Some("http://127.0.0.1:9/send"))).is_ok());
    }
}
