use super::{INotificationSender, InviteMessage, SendReceipt};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Debug, Serialize)]
struct EmailAttachment<'a> {
    filename: &'a str,
    content: String,
    content_type: &'a str,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
    attachments: Vec<EmailAttachment<'a>>,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Sends emails through a transactional email HTTP api which accepts
/// base64 encoded attachments and authenticates with a bearer api key.
pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl INotificationSender for HttpMailer {
    async fn send(&self, message: &InviteMessage) -> anyhow::Result<SendReceipt> {
        let body = SendEmailRequest {
            from: &message.from,
            to: vec![&message.to],
            subject: &message.subject,
            text: &message.text,
            html: &message.html,
            attachments: vec![EmailAttachment {
                filename: &message.attachment.filename,
                content: STANDARD.encode(message.attachment.content.as_bytes()),
                content_type: &message.attachment.content_type,
            }],
        };

        let res = match self
            .client
            .post(&self.api_url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!("[Network Error] Email api POST error. Error message: {:?}", e);
                return Err(anyhow::Error::new(e));
            }
        };

        let status = res.status();
        if !status.is_success() {
            let reason = res.text().await.unwrap_or_default();
            error!(
                "[Unexpected Response] Email api rejected message with status: {}. Response: {}",
                status, reason
            );
            return Err(anyhow::Error::msg(format!(
                "Email api responded with status {}",
                status
            )));
        }

        match res.json::<SendEmailResponse>().await {
            Ok(res) => Ok(SendReceipt {
                accepted: vec![message.to.clone()],
                message_id: res.id,
            }),
            Err(e) => {
                // The message was accepted, only the response body is off
                error!(
                    "[Unexpected Response] Email api POST response could not be parsed. Error message: {:?}",
                    e
                );
                Ok(SendReceipt {
                    accepted: vec![message.to.clone()],
                    message_id: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::services::mailer::CalendarAttachment;
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use base64::Engine as _;
    use serde_json::{json, Value};
    use std::net::TcpListener;
    use std::sync::Mutex;

    const API_KEY: &str = "test-key";

    type Received = web::Data<Mutex<Vec<Value>>>;

    async fn accept_email(
        req: HttpRequest,
        body: web::Json<Value>,
        received: Received,
    ) -> HttpResponse {
        let authorized = req
            .headers()
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .map(|h| h == format!("Bearer {}", API_KEY))
            .unwrap_or(false);
        if !authorized {
            return HttpResponse::Unauthorized().finish();
        }
        received.lock().unwrap().push(body.0);
        HttpResponse::Ok().json(json!({ "id": "msg_1" }))
    }

    async fn reject_email() -> HttpResponse {
        HttpResponse::UnprocessableEntity().json(json!({ "message": "Invalid `to` field" }))
    }

    async fn accept_with_plain_text() -> HttpResponse {
        HttpResponse::Ok().body("queued")
    }

    // Launch a fake email api as a background task
    fn spawn_mail_api() -> (String, Received) {
        let received: Received = web::Data::new(Mutex::new(Vec::new()));
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        let data = received.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/emails", web::post().to(accept_email))
                .route("/rejected", web::post().to(reject_email))
                .route("/plain", web::post().to(accept_with_plain_text))
        })
        .listen(listener)
        .expect("Failed to listen")
        .workers(1)
        .run();
        let _ = actix_web::rt::spawn(server);

        (format!("http://127.0.0.1:{}", port), received)
    }

    fn message() -> InviteMessage {
        InviteMessage {
            from: "Event Invitations <no-reply@stagholme.com>".into(),
            to: "ada@example.com".into(),
            subject: "Kilmer Branch Library".into(),
            text: "You are invited".into(),
            html: "<p>You are invited</p>".into(),
            attachment: CalendarAttachment::invite("BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n".into()),
        }
    }

    #[actix_web::main]
    #[test]
    async fn sends_invite_with_encoded_attachment() {
        let (address, received) = spawn_mail_api();
        let mailer = HttpMailer::new(format!("{}/emails", address), API_KEY.into());

        let receipt = mailer.send(&message()).await.expect("Send to succeed");
        assert_eq!(
            receipt,
            SendReceipt {
                accepted: vec!["ada@example.com".into()],
                message_id: Some("msg_1".into()),
            }
        );

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let body = &received[0];
        assert_eq!(body["to"], json!(["ada@example.com"]));
        assert_eq!(body["subject"], json!("Kilmer Branch Library"));
        let attachment = &body["attachments"][0];
        assert_eq!(attachment["filename"], json!("invitation.ics"));
        assert_eq!(
            attachment["content_type"],
            json!("text/calendar; method=REQUEST; charset=UTF-8")
        );
        let content = STANDARD
            .decode(attachment["content"].as_str().unwrap())
            .unwrap();
        assert_eq!(content, b"BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
    }

    #[actix_web::main]
    #[test]
    async fn fails_on_unauthorized_or_rejected_message() {
        let (address, received) = spawn_mail_api();

        let mailer = HttpMailer::new(format!("{}/emails", address), "wrong-key".into());
        assert!(mailer.send(&message()).await.is_err());
        assert!(received.lock().unwrap().is_empty());

        let mailer = HttpMailer::new(format!("{}/rejected", address), API_KEY.into());
        assert!(mailer.send(&message()).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn accepts_unparsable_success_response() {
        let (address, _) = spawn_mail_api();
        let mailer = HttpMailer::new(format!("{}/plain", address), API_KEY.into());

        let receipt = mailer.send(&message()).await.expect("Send to succeed");
        assert_eq!(receipt.accepted, vec!["ada@example.com".to_string()]);
        assert_eq!(receipt.message_id, None);
    }

    #[actix_web::main]
    #[test]
    async fn fails_when_api_is_unreachable() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let mailer = HttpMailer::new(format!("http://127.0.0.1:{}/emails", port), API_KEY.into());

        assert!(mailer.send(&message()).await.is_err());
    }
}
