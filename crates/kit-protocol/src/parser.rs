//! Section parser.
//!
//! Turns a terminated message into a [`ParsedMessage`]. Parsing is pure:
//! handles, indices and interface directives are returned to the caller,
//! which applies them to the session only once the whole message parsed.
//!
//! ```text
//! target[(HH)]:command[(HEX)][:subcommand]<terminator>
//! ```

use kit_common::hex_decode;
use kit_hal::PhysicalInterface;

use crate::command::{CommandFamily, KitCommand};
use crate::config::{ProtocolConfig, KIT_DEVICE_HANDLE_SIZE, KIT_DEVICE_INDEX_SIZE};
use crate::error::ParseError;
use crate::token::{Token, TokenKind, Tokenizer};

const TARGET: &str = "target";
const COMMAND: &str = "command";
const SUBCOMMAND: &str = "subcommand";

/// Result of parsing one message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedMessage {
    pub command: KitCommand,
    /// Handle given in the target section, e.g. `device(01)`.
    pub target_handle: Option<u32>,
    /// Index given to `physical:select(..)`.
    pub select_index: Option<u32>,
    /// Bus requested by `physical:interface:..`.
    pub interface: Option<PhysicalInterface>,
    /// Decoded payload.
    pub payload: Vec<u8>,
}

/// Parse one message.
///
/// Bytes after the first terminator are ignored.
pub fn parse_message(message: &[u8], config: &ProtocolConfig) -> Result<ParsedMessage, ParseError> {
    let tokens: Vec<Token> = Tokenizer::new(message, config).collect();
    let end = tokens
        .iter()
        .position(|t| t.kind == TokenKind::End)
        .ok_or(ParseError::Incomplete)?;
    let tokens = &tokens[..end];

    // Target
    let first_layer = tokens
        .iter()
        .position(|t| t.kind == TokenKind::Layer)
        .ok_or(ParseError::MissingSection { section: COMMAND })?;
    let target = &tokens[..first_layer];
    let (family, target_handle) = parse_target(target, message, config)?;

    // Command
    let rest = &tokens[first_layer + 1..];
    let command_end = rest.iter().position(|t| t.kind == TokenKind::Layer);
    let command_tokens = &rest[..command_end.unwrap_or(rest.len())];
    let (command, payload_hex) =
        parse_command(command_tokens, command_end.is_some(), family, message)?;

    let mut parsed = ParsedMessage {
        command,
        target_handle,
        ..ParsedMessage::default()
    };

    // Subcommand
    if command == KitCommand::Physical {
        let subcommand = match command_end {
            Some(i) => &rest[i + 1..],
            None => return Err(ParseError::MissingSection { section: SUBCOMMAND }),
        };
        parse_subcommand(subcommand, message, &mut parsed)?;
    }

    // Payload
    if let Some(hex) = payload_hex {
        if hex.len() > config.max_message_size {
            return Err(ParseError::PayloadTooLarge {
                max: config.max_message_size,
                actual: hex.len(),
            });
        }
        parsed.payload = hex_decode(hex)?;
    }

    Ok(parsed)
}

fn first_byte(tokens: &[Token], message: &[u8], section: &'static str) -> Result<u8, ParseError> {
    tokens
        .first()
        .map(|t| message[t.start].to_ascii_lowercase())
        .ok_or(ParseError::EmptySection { section })
}

fn parse_target(
    tokens: &[Token],
    message: &[u8],
    config: &ProtocolConfig,
) -> Result<(CommandFamily, Option<u32>), ParseError> {
    let family = match first_byte(tokens, message, TARGET)? {
        b'b' => CommandFamily::Board,
        b'd' => CommandFamily::Device,
        b'a' | b'e' | b's' | b't' if config.legacy_targets => CommandFamily::Device,
        other => return Err(ParseError::UnknownTarget(other as char)),
    };

    let handle = match enclosed(tokens, message, TARGET)? {
        Some(text) => Some(parse_handle(text, KIT_DEVICE_HANDLE_SIZE)?),
        None => None,
    };

    Ok((family, handle))
}

fn parse_command<'m>(
    tokens: &[Token],
    ends_with_layer: bool,
    family: CommandFamily,
    message: &'m [u8],
) -> Result<(KitCommand, Option<&'m [u8]>), ParseError> {
    let Some(first) = tokens.first() else {
        return Err(ParseError::EmptySection { section: COMMAND });
    };

    let has_data = tokens.iter().any(|t| t.kind == TokenKind::DataBegin);
    if !has_data && !ends_with_layer {
        return Err(ParseError::MissingData { section: COMMAND });
    }

    let mnemonic = match first.kind {
        TokenKind::Text => first.text(message).to_ascii_lowercase(),
        _ => Vec::new(),
    };
    let command = KitCommand::from_mnemonic(family, &mnemonic);

    match command {
        KitCommand::Unknown => Err(ParseError::UnknownCommand(
            String::from_utf8_lossy(&mnemonic).into_owned(),
        )),
        KitCommand::Physical => Ok((command, None)),
        _ => match enclosed(tokens, message, COMMAND)? {
            Some(text) => Ok((command, Some(text))),
            None => Err(ParseError::MissingData { section: COMMAND }),
        },
    }
}

fn parse_subcommand(
    tokens: &[Token],
    message: &[u8],
    parsed: &mut ParsedMessage,
) -> Result<(), ParseError> {
    let selector = first_byte(tokens, message, SUBCOMMAND)?;
    let has_delimiter = tokens
        .iter()
        .any(|t| matches!(t.kind, TokenKind::DataBegin | TokenKind::Layer));
    if !has_delimiter {
        return Err(ParseError::MissingData { section: SUBCOMMAND });
    }

    match selector {
        b's' => {
            let text = enclosed(tokens, message, SUBCOMMAND)?
                .ok_or(ParseError::MissingData { section: SUBCOMMAND })?;
            parsed.command = KitCommand::PhysicalSelect;
            parsed.select_index = Some(parse_handle(text, KIT_DEVICE_INDEX_SIZE)?);
        }
        b'i' => {
            let layer = tokens
                .iter()
                .position(|t| t.kind == TokenKind::Layer)
                .ok_or_else(|| ParseError::InvalidInterface(String::new()))?;
            let value: Vec<u8> = tokens[layer + 1..]
                .iter()
                .flat_map(|t| t.text(message).iter().map(u8::to_ascii_lowercase))
                .collect();
            let iface = interface_from_value(&value).ok_or_else(|| {
                ParseError::InvalidInterface(String::from_utf8_lossy(&value).into_owned())
            })?;
            parsed.interface = Some(iface);
        }
        _ => {
            let name = tokens[0].text(message);
            return Err(ParseError::UnknownSubcommand(
                String::from_utf8_lossy(name).into_owned(),
            ));
        }
    }
    Ok(())
}

/// Bytes strictly between the first data-begin delimiter of a section and
/// the data-end delimiter that follows it.
fn enclosed<'m>(
    tokens: &[Token],
    message: &'m [u8],
    section: &'static str,
) -> Result<Option<&'m [u8]>, ParseError> {
    let Some(begin) = tokens.iter().position(|t| t.kind == TokenKind::DataBegin) else {
        return Ok(None);
    };
    let end = tokens[begin + 1..]
        .iter()
        .find(|t| t.kind == TokenKind::DataEnd)
        .ok_or(ParseError::UnterminatedData { section })?;
    Ok(Some(&message[tokens[begin].end..end.start]))
}

/// Fixed-width hex handle or index.
fn parse_handle(text: &[u8], width: usize) -> Result<u32, ParseError> {
    if text.len() != width {
        return Err(ParseError::InvalidHandleWidth {
            expected: width,
            actual: text.len(),
        });
    }
    let bytes = hex_decode(text)?;
    Ok(bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
}

/// Bus named by an interface directive value.
///
/// `sp..` is SPI, `sw` with at most one more character is SWI, a longer
/// `sw..` is the second single-wire variant and anything else is I2C.
fn interface_from_value(value: &[u8]) -> Option<PhysicalInterface> {
    match value {
        [] | [_] => None,
        [b's', b'p', ..] => Some(PhysicalInterface::Spi),
        [b's', b'w'] | [b's', b'w', _] => Some(PhysicalInterface::Swi),
        [b's', b'w', ..] => Some(PhysicalInterface::Swi2),
        _ => Some(PhysicalInterface::I2c),
    }
}
