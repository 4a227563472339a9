mod webhook;

pub use webhook::{AlertBatch, AlertRecord, AlertStatus, HandlingResult, WebhookHandler};
