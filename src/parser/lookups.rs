use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{expressions::Expr, statements::Stmt},
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Left and right binding power of an operator.
///
/// `left` decides whether the operator may continue the expression on its
/// left, `right` is the minimum power its right operand is parsed with.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct BindingPower {
    pub left: u8,
    pub right: u8,
}

impl BindingPower {
    /// Not an infix operator, the expression loop stops here.
    pub const NONE: BindingPower = BindingPower { left: 0, right: 0 };

    pub const fn left_assoc(level: u8) -> Self {
        BindingPower {
            left: level,
            right: level + 1,
        }
    }

    pub const fn right_assoc(level: u8) -> Self {
        BindingPower {
            left: level,
            right: level - 1,
        }
    }

    pub const fn prefix(right: u8) -> Self {
        BindingPower { left: 0, right }
    }

    pub const fn postfix(level: u8) -> Self {
        BindingPower {
            left: level,
            right: level,
        }
    }
}

pub const LOGICAL_OR: u8 = 10;
pub const LOGICAL_AND: u8 = 20;
pub const EQUALITY: u8 = 30;
pub const RELATIONAL: u8 = 40;
pub const ADDITIVE: u8 = 50;
pub const MULTIPLICATIVE: u8 = 60;
pub const EXPONENT: u8 = 70;
pub const UNARY: u8 = 80;
pub const ACCESS: u8 = 90;

pub type StmtHandler = fn(&mut Parser) -> Stmt;
pub type NUDHandler = fn(&mut Parser) -> Expr;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Expr;

pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

lazy_static! {
    pub static ref BINDING_POWER_LOOKUP: BPLookup = {
        let mut map = HashMap::new();

        // Logical
        map.insert(TokenKind::Or, BindingPower::left_assoc(LOGICAL_OR));
        map.insert(TokenKind::And, BindingPower::left_assoc(LOGICAL_AND));

        // Equality and relational
        map.insert(TokenKind::Equals, BindingPower::left_assoc(EQUALITY));
        map.insert(TokenKind::NotEquals, BindingPower::left_assoc(EQUALITY));
        map.insert(TokenKind::Less, BindingPower::left_assoc(RELATIONAL));
        map.insert(TokenKind::LessEquals, BindingPower::left_assoc(RELATIONAL));
        map.insert(TokenKind::Greater, BindingPower::left_assoc(RELATIONAL));
        map.insert(TokenKind::GreaterEquals, BindingPower::left_assoc(RELATIONAL));

        // Additive and multiplicative
        map.insert(TokenKind::Plus, BindingPower::left_assoc(ADDITIVE));
        map.insert(TokenKind::Dash, BindingPower::left_assoc(ADDITIVE));
        map.insert(TokenKind::Star, BindingPower::left_assoc(MULTIPLICATIVE));
        map.insert(TokenKind::Slash, BindingPower::left_assoc(MULTIPLICATIVE));
        map.insert(TokenKind::Percent, BindingPower::left_assoc(MULTIPLICATIVE));
        map.insert(TokenKind::StarStar, BindingPower::right_assoc(EXPONENT));

        // Call and member access
        map.insert(TokenKind::OpenParen, BindingPower::postfix(ACCESS));
        map.insert(TokenKind::Dot, BindingPower::postfix(ACCESS));
        map
    };

    pub static ref PREFIX_BINDING_POWER_LOOKUP: BPLookup = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Not, BindingPower::prefix(UNARY));
        map.insert(TokenKind::Dash, BindingPower::prefix(UNARY));
        map
    };

    pub static ref NUD_LOOKUP: NUDLookup = {
        let mut map: NUDLookup = HashMap::new();
        map.insert(TokenKind::Not, parse_prefix_expr);
        map.insert(TokenKind::Dash, parse_prefix_expr);
        map.insert(TokenKind::OpenParen, parse_grouping_expr);
        map.insert(TokenKind::OpenBracket, parse_list_expr);
        map.insert(TokenKind::OpenCurly, parse_dict_expr);

        // Literals and symbols
        map.insert(TokenKind::Identifier, parse_primary_expr);
        map.insert(TokenKind::String, parse_primary_expr);
        map.insert(TokenKind::Number, parse_primary_expr);
        map.insert(TokenKind::True, parse_primary_expr);
        map.insert(TokenKind::False, parse_primary_expr);
        map.insert(TokenKind::Null, parse_primary_expr);
        map
    };

    pub static ref LED_LOOKUP: LEDLookup = {
        let mut map: LEDLookup = HashMap::new();
        for kind in BINDING_POWER_LOOKUP.keys() {
            map.insert(*kind, parse_binary_expr);
        }
        map.insert(TokenKind::OpenParen, parse_call_expr);
        map.insert(TokenKind::Dot, parse_member_expr);
        map
    };

    pub static ref STMT_LOOKUP: StmtLookup = {
        let mut map: StmtLookup = HashMap::new();
        map.insert(TokenKind::Proc, parse_proc_decl_stmt);
        map.insert(TokenKind::Enum, parse_enum_decl_stmt);
        map.insert(TokenKind::Private, parse_var_decl_stmt);
        map.insert(TokenKind::Public, parse_var_decl_stmt);
        map.insert(TokenKind::Temp, parse_var_decl_stmt);
        map
    };
}

/// Infix/postfix binding power of `kind`, `BindingPower::NONE` for anything else.
pub fn binding_power(kind: TokenKind) -> BindingPower {
    BINDING_POWER_LOOKUP
        .get(&kind)
        .copied()
        .unwrap_or(BindingPower::NONE)
}

pub fn prefix_binding_power(kind: TokenKind) -> BindingPower {
    PREFIX_BINDING_POWER_LOOKUP
        .get(&kind)
        .copied()
        .unwrap_or(BindingPower::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_operators_are_left_associative() {
        for kind in [TokenKind::Plus, TokenKind::Star, TokenKind::Equals, TokenKind::And] {
            let bp = binding_power(kind);
            assert!(bp.right > bp.left, "{:?} should be left associative", kind);
        }
    }

    #[test]
    fn test_exponent_is_right_associative() {
        let bp = binding_power(TokenKind::StarStar);
        assert!(bp.right < bp.left);
        assert!(bp.left > binding_power(TokenKind::Star).left);
    }

    #[test]
    fn test_unary_binds_between_binary_and_access() {
        let unary = prefix_binding_power(TokenKind::Dash);
        assert_eq!(unary.left, 0);
        assert!(unary.right > binding_power(TokenKind::StarStar).left);
        assert!(unary.right < binding_power(TokenKind::Dot).left);
        assert!(unary.right < binding_power(TokenKind::OpenParen).left);
    }

    #[test]
    fn test_lookup_miss_is_zero() {
        assert_eq!(binding_power(TokenKind::Semicolon), BindingPower::NONE);
        assert_eq!(binding_power(TokenKind::OpenCurly), BindingPower::NONE);
        assert_eq!(binding_power(TokenKind::Not), BindingPower::NONE);
    }
}
