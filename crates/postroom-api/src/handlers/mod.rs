//! HTTP handlers, one file per recipient operation.

pub mod recipient_batch;
pub mod recipient_create;
pub mod recipient_delete;
pub mod recipient_download;
pub mod recipient_get;
pub mod recipient_list;
pub mod recipient_published;
pub mod recipient_update;
