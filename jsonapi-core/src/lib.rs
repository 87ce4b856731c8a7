#![forbid(unsafe_code)]

pub mod assert;
pub mod error;
pub mod parser;
pub mod payload;
pub mod scope;
pub mod settings;

pub use crate::assert::{
    assert_array_len, assert_boolean_eq, assert_empty_array, assert_integer_eq, assert_item_count,
    assert_kind, assert_status, assert_string_eq, assert_structure, expected_keys,
    is_json_content_type, parse_boolean_literal, ValueKind,
};
pub use crate::error::{
    AssertionError, DecodeCategory, DecodeError, ExpectationError, SettingsError, UsageError,
};
pub use crate::parser::{load_settings, parse_settings_str, SettingsFormat};
pub use crate::payload::decode_payload;
pub use crate::scope::{navigate, Scope, ScopedPayload};
pub use crate::settings::{HttpSettings, OAuthSettings, Parameters, Secret, Settings, TokenEncoding};
