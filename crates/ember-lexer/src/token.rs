//! Jetons produits par le scanner.

use core::fmt;

use ember_core::Span;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Genre de jeton lexical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TokenKind {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `/`
    Slash,
    /// `*`
    Star,
    /// `!`
    Bang,
    /// `!=`
    BangEqual,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// Identifiant.
    Identifier,
    /// Littéral chaîne (guillemets inclus, non décodé).
    String,
    /// Littéral numérique.
    Number,
    /// `and`
    And,
    /// `class`
    Class,
    /// `else`
    Else,
    /// `false`
    False,
    /// `for`
    For,
    /// `fun` (produit seulement avec `ScannerOptions::distinct_fun`)
    Fun,
    /// `if`
    If,
    /// `nil`
    Nil,
    /// `or`
    Or,
    /// `print`
    Print,
    /// `return`
    Return,
    /// `super`
    Super,
    /// `this`
    This,
    /// `true`
    True,
    /// `var`
    Var,
    /// `while`
    While,
    /// Erreur lexicale (le lexème porte le message).
    Error,
    /// Fin de source.
    Eof,
}

impl TokenKind {
    /// Nom stable, en majuscules (`LEFT_PAREN`, `BANG_EQUAL`, …).
    #[must_use]
    pub const fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            LeftParen => "LEFT_PAREN",
            RightParen => "RIGHT_PAREN",
            LeftBrace => "LEFT_BRACE",
            RightBrace => "RIGHT_BRACE",
            Comma => "COMMA",
            Semicolon => "SEMICOLON",
            Dot => "DOT",
            Minus => "MINUS",
            Plus => "PLUS",
            Slash => "SLASH",
            Star => "STAR",
            Bang => "BANG",
            BangEqual => "BANG_EQUAL",
            Equal => "EQUAL",
            EqualEqual => "EQUAL_EQUAL",
            Greater => "GREATER",
            GreaterEqual => "GREATER_EQUAL",
            Less => "LESS",
            LessEqual => "LESS_EQUAL",
            Identifier => "IDENTIFIER",
            String => "STRING",
            Number => "NUMBER",
            And => "AND",
            Class => "CLASS",
            Else => "ELSE",
            False => "FALSE",
            For => "FOR",
            Fun => "FUN",
            If => "IF",
            Nil => "NIL",
            Or => "OR",
            Print => "PRINT",
            Return => "RETURN",
            Super => "SUPER",
            This => "THIS",
            True => "TRUE",
            Var => "VAR",
            While => "WHILE",
            Error => "ERROR",
            Eof => "EOF",
        }
    }

    /// Vrai pour les mots-clés réservés.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            And | Class | Else | False | For | Fun | If | Nil | Or | Print | Return | Super | This
                | True | Var | While
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.name()) }
}

/// Jeton : genre, lexème emprunté à la source, ligne de départ.
///
/// Pour un jeton `Error`, `lexeme` est le message de diagnostic et `span`
/// couvre le texte consommé pour le produire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Token<'src> {
    /// Genre du jeton.
    pub kind: TokenKind,
    /// Texte source du jeton (jamais copié).
    pub lexeme: &'src str,
    /// Ligne (1-based) au début du jeton.
    pub line: u32,
    /// Plage d'octets dans la source.
    pub span: Span,
}

impl Token<'_> {
    /// Vrai pour le jeton de fin.
    #[must_use]
    pub const fn is_eof(&self) -> bool { matches!(self.kind, TokenKind::Eof) }

    /// Vrai pour un jeton d'erreur lexicale.
    #[must_use]
    pub const fn is_error(&self) -> bool { matches!(self.kind, TokenKind::Error) }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:4} {:<13} '{}'", self.line, self.kind, self.lexeme)
    }
}
