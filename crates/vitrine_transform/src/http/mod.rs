//! HTTP implementation of the media processing service.

mod client;
mod dto;

pub use client::HttpMediaService;
pub(crate) use dto::{BatchItemDto, BatchResponseDto, StatusDto};
