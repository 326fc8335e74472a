//! Delimiter tokenizer.
//!
//! Splits a raw message into typed tokens before any semantic
//! interpretation. Runs of non-delimiter bytes become a single
//! [`TokenKind::Text`] token; tokenizing stops after the first message
//! terminator.

use crate::config::ProtocolConfig;

/// Kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Run of non-delimiter bytes.
    Text,
    /// Section separator.
    Layer,
    /// Opening data delimiter.
    DataBegin,
    /// Closing data delimiter.
    DataEnd,
    /// Message terminator.
    End,
}

/// A token and its byte range in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    /// Bytes this token covers.
    pub fn text<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        &input[self.start..self.end]
    }
}

/// Iterator over the tokens of one message.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    done: bool,
    message: u8,
    layer: u8,
    data_begin: u8,
    data_end: u8,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a [u8], config: &ProtocolConfig) -> Self {
        Tokenizer {
            input,
            pos: 0,
            done: false,
            message: config.message_byte(),
            layer: config.layer_byte(),
            data_begin: config.data_begin_byte(),
            data_end: config.data_end_byte(),
        }
    }

    fn classify(&self, byte: u8) -> Option<TokenKind> {
        if byte == self.message {
            Some(TokenKind::End)
        } else if byte == self.layer {
            Some(TokenKind::Layer)
        } else if byte == self.data_begin {
            Some(TokenKind::DataBegin)
        } else if byte == self.data_end {
            Some(TokenKind::DataEnd)
        } else {
            None
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done || self.pos >= self.input.len() {
            return None;
        }

        let start = self.pos;
        if let Some(kind) = self.classify(self.input[start]) {
            self.pos += 1;
            self.done = kind == TokenKind::End;
            return Some(Token { kind, start, end: self.pos });
        }

        while self.pos < self.input.len() && self.classify(self.input[self.pos]).is_none() {
            self.pos += 1;
        }
        Some(Token {
            kind: TokenKind::Text,
            start,
            end: self.pos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &[u8]) -> Vec<TokenKind> {
        Tokenizer::new(input, &ProtocolConfig::default())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_talk() {
        use TokenKind::*;
        assert_eq!(
            kinds(b"device(01):talk(0102)\n"),
            vec![Text, DataBegin, Text, DataEnd, Layer, Text, DataBegin, Text, DataEnd, End]
        );
    }

    #[test]
    fn test_stops_at_first_terminator() {
        use TokenKind::*;
        assert_eq!(kinds(b"b:v()\nextra\n"), vec![Text, Layer, Text, DataBegin, DataEnd, End]);
    }

    #[test]
    fn test_token_ranges() {
        let input = b"board:version()\n";
        let tokens: Vec<Token> = Tokenizer::new(input, &ProtocolConfig::default()).collect();
        assert_eq!(tokens[0].text(input), b"board");
        assert_eq!(tokens[2].text(input), b"version");
        assert_eq!(tokens[2].start, 6);
    }

    #[test]
    fn test_custom_delimiters() {
        use TokenKind::*;
        let config = ProtocolConfig {
            message_delimiter: ';',
            layer_delimiter: '/',
            ..ProtocolConfig::default()
        };
        let tokens: Vec<TokenKind> = Tokenizer::new(b"b/v();", &config).map(|t| t.kind).collect();
        assert_eq!(tokens, vec![Text, Layer, Text, DataBegin, DataEnd, End]);
    }
}
