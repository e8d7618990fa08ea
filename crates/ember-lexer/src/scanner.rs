//! Scanner : curseur sur une source immuable, un jeton à la fois.

use core::iter::FusedIterator;

use ember_core::Span;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::token::{Token, TokenKind};

/// Message du jeton d'erreur pour une chaîne non fermée.
pub const UNTERMINATED_STRING: &str = "unterminated string";
/// Message du jeton d'erreur pour un caractère inconnu.
pub const UNEXPECTED_CHARACTER: &str = "Unexpected character.";

/* ─────────────────────────── Options ─────────────────────────── */

/// Options du scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScannerOptions {
    /// Reconnaître `fun` comme [`TokenKind::Fun`].
    ///
    /// Désactivé par défaut : `fun` est alors classé [`TokenKind::For`],
    /// comme le faisait la table de mots-clés historique.
    pub distinct_fun: bool,
}

/* ─────────────────────────── Scanner ─────────────────────────── */

/// Analyseur lexical à la demande (pull).
///
/// La source est empruntée pour `'src` : elle survit au scanner et à tous
/// les jetons produits.
#[derive(Debug, Clone)]
pub struct Scanner<'src> {
    source: &'src str,
    bytes: &'src [u8],
    /// Début du lexème en cours.
    start: usize,
    /// Position de lecture.
    current: usize,
    /// Ligne courante (1-based).
    line: u32,
    /// Ligne au début du lexème en cours.
    start_line: u32,
    opts: ScannerOptions,
    /// EOF déjà rendu par l'itérateur.
    done: bool,
}

impl<'src> Scanner<'src> {
    /// Crée un scanner avec options par défaut.
    #[must_use]
    pub fn new(source: &'src str) -> Self { Self::with_options(source, ScannerOptions::default()) }

    /// Crée un scanner avec `ScannerOptions`.
    #[must_use]
    pub const fn with_options(source: &'src str, opts: ScannerOptions) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            opts,
            done: false,
        }
    }

    /// Ligne courante.
    #[must_use]
    pub const fn line(&self) -> u32 { self.line }

    /// Offset de lecture courant (en bytes).
    #[must_use]
    pub const fn offset(&self) -> usize { self.current }

    /// Options actives.
    #[must_use]
    pub const fn options(&self) -> ScannerOptions { self.opts }

    /// Prochain jeton. Une fois la fin atteinte, renvoie `Eof` indéfiniment.
    pub fn next_token(&mut self) -> Token<'src> {
        loop {
            self.skip_trivia();
            self.start = self.current;
            self.start_line = self.line;

            let Some(c) = self.advance() else {
                return self.make_token(TokenKind::Eof);
            };

            let token = match c {
                b'\n' => {
                    self.line = self.line.saturating_add(1);
                    continue;
                }
                c if is_alpha(c) => self.identifier(),
                c if c.is_ascii_digit() => self.number(),
                b'"' => self.string(),

                b'(' => self.make_token(TokenKind::LeftParen),
                b')' => self.make_token(TokenKind::RightParen),
                b'{' => self.make_token(TokenKind::LeftBrace),
                b'}' => self.make_token(TokenKind::RightBrace),
                b',' => self.make_token(TokenKind::Comma),
                b';' => self.make_token(TokenKind::Semicolon),
                b'.' => self.make_token(TokenKind::Dot),
                b'-' => self.make_token(TokenKind::Minus),
                b'+' => self.make_token(TokenKind::Plus),
                b'*' => self.make_token(TokenKind::Star),
                // `//` a déjà été absorbé par skip_trivia
                b'/' => self.make_token(TokenKind::Slash),

                b'!' => self.either(b'=', TokenKind::BangEqual, TokenKind::Bang),
                b'=' => self.either(b'=', TokenKind::EqualEqual, TokenKind::Equal),
                b'<' => self.either(b'=', TokenKind::LessEqual, TokenKind::Less),
                b'>' => self.either(b'=', TokenKind::GreaterEqual, TokenKind::Greater),

                _ => self.unexpected_character(),
            };

            trace_log!("token {} {:?} @{}", token.kind, token.lexeme, token.line);
            return token;
        }
    }

    /* ────────── Primitives internes ────────── */

    #[inline] fn is_at_end(&self) -> bool { self.current >= self.bytes.len() }
    #[inline] fn peek(&self) -> Option<u8> { self.bytes.get(self.current).copied() }
    #[inline] fn peek_next(&self) -> Option<u8> { self.bytes.get(self.current + 1).copied() }

    #[inline]
    fn advance(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() { self.current += 1; }
        b
    }

    #[inline]
    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) { self.current += 1; true } else { false }
    }

    fn consume_while(&mut self, mut p: impl FnMut(u8) -> bool) {
        while let Some(b) = self.peek() {
            if p(b) { self.current += 1; } else { break; }
        }
    }

    /// Espaces, tabulations, retours chariot et commentaires `//`.
    /// Le `\n` reste en place : c'est `next_token` qui compte les lignes.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r') => self.current += 1,
                Some(b'/') if self.peek_next() == Some(b'/') => self.consume_while(|b| b != b'\n'),
                _ => return,
            }
        }
    }

    /* ────────── Classes de lexèmes ────────── */

    fn identifier(&mut self) -> Token<'src> {
        self.consume_while(|b| is_alpha(b) || b.is_ascii_digit());
        let kind = self.identifier_kind();
        self.make_token(kind)
    }

    /// Aiguillage sur le premier (puis le second) caractère, puis comparaison
    /// exacte de la longueur et de la fin du lexème.
    fn identifier_kind(&self) -> TokenKind {
        let lexeme = &self.bytes[self.start..self.current];
        match lexeme {
            [b'a', ..] => self.check_keyword(1, "nd", TokenKind::And),
            [b'c', ..] => self.check_keyword(1, "lass", TokenKind::Class),
            [b'e', ..] => self.check_keyword(1, "lse", TokenKind::Else),
            [b'f', second, ..] => match second {
                b'a' => self.check_keyword(2, "lse", TokenKind::False),
                b'o' => self.check_keyword(2, "r", TokenKind::For),
                b'u' => self.check_keyword(2, "n", self.fun_kind()),
                _ => TokenKind::Identifier,
            },
            [b'i', ..] => self.check_keyword(1, "f", TokenKind::If),
            [b'n', ..] => self.check_keyword(1, "il", TokenKind::Nil),
            [b'o', ..] => self.check_keyword(1, "r", TokenKind::Or),
            [b'p', ..] => self.check_keyword(1, "rint", TokenKind::Print),
            [b'r', ..] => self.check_keyword(1, "eturn", TokenKind::Return),
            [b's', ..] => self.check_keyword(1, "uper", TokenKind::Super),
            [b't', second, ..] => match second {
                b'h' => self.check_keyword(2, "is", TokenKind::This),
                b'r' => self.check_keyword(2, "ue", TokenKind::True),
                _ => TokenKind::Identifier,
            },
            [b'v', ..] => self.check_keyword(1, "ar", TokenKind::Var),
            [b'w', ..] => self.check_keyword(1, "hile", TokenKind::While),
            _ => TokenKind::Identifier,
        }
    }

    fn check_keyword(&self, begin: usize, rest: &str, kind: TokenKind) -> TokenKind {
        let lexeme = &self.bytes[self.start..self.current];
        if lexeme.len() == begin + rest.len() && &lexeme[begin..] == rest.as_bytes() {
            kind
        } else {
            TokenKind::Identifier
        }
    }

    const fn fun_kind(&self) -> TokenKind {
        if self.opts.distinct_fun { TokenKind::Fun } else { TokenKind::For }
    }

    /// Partie entière, puis au plus un `.` suivi de chiffres. Pas d'exposant ni de signe.
    fn number(&mut self) -> Token<'src> {
        self.consume_while(|b| b.is_ascii_digit());
        if self.eat(b'.') {
            self.consume_while(|b| b.is_ascii_digit());
        }
        self.make_token(TokenKind::Number)
    }

    /// Le lexème garde ses guillemets ; aucun échappement n'est décodé.
    fn string(&mut self) -> Token<'src> {
        while let Some(c) = self.peek() {
            if c == b'"' {
                break;
            }
            if c == b'\n' {
                self.line = self.line.saturating_add(1);
            }
            self.current += 1;
        }
        if self.is_at_end() {
            return self.error_token(UNTERMINATED_STRING);
        }
        self.current += 1;
        self.make_token(TokenKind::String)
    }

    fn either(&mut self, next: u8, matched: TokenKind, single: TokenKind) -> Token<'src> {
        let kind = if self.eat(next) { matched } else { single };
        self.make_token(kind)
    }

    /// Consomme le scalaire Unicode entier pour rester sur une frontière de char.
    fn unexpected_character(&mut self) -> Token<'src> {
        let width = self.source[self.start..].chars().next().map_or(1, char::len_utf8);
        self.current = self.start + width;
        self.error_token(UNEXPECTED_CHARACTER)
    }

    /* ────────── Construction des jetons ────────── */

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token {
            kind,
            lexeme: &self.source[self.start..self.current],
            line: self.start_line,
            span: Span::from_range(self.start, self.current),
        }
    }

    fn error_token(&self, message: &'static str) -> Token<'src> {
        debug_log!("lexical error at line {}: {message}", self.line);
        Token {
            kind: TokenKind::Error,
            lexeme: message,
            line: self.line,
            span: Span::from_range(self.start, self.current),
        }
    }
}

/// Itère sur tous les jetons, `Eof` compris (une seule fois), puis `None`.
impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        self.done = token.is_eof();
        Some(token)
    }
}

impl FusedIterator for Scanner<'_> {}

/* ─────────────────────────── Helpers ─────────────────────────── */

#[inline]
const fn is_alpha(c: u8) -> bool { c == b'_' || c.is_ascii_alphabetic() }

/* ─────────────────────────── Tests ─────────────────────────── */
