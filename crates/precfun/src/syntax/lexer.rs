//! Lexer implementation.

use lexgen_util::Loc;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Token<'input> {
    Colon,
    Comma,
    Semicolon,
    Lt,
    Gt,
    Eq,
    Dot,
    Kw(Keyword),
    Ident(&'input str),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Keyword {
    Group,
    End,
    Columns,
    Row,
    Order,
}

pub type Spanned<'input> = (Loc, Token<'input>, Loc);

lexgen::lexer! {
    pub Lexer -> Token<'input>;

    let whitespace = [' ' '\t' '\n' '\r'];
    let ident = ($$XID_Start | '_') $$XID_Continue*;

    rule Init {
        $whitespace+,
        "//" (_ # ['\r' '\n'])*,
        ":" = Token::Colon,
        "," = Token::Comma,
        ";" = Token::Semicolon,
        "<" = Token::Lt,
        ">" = Token::Gt,
        "=" = Token::Eq,
        "." = Token::Dot,
        "@group" = Token::Kw(Keyword::Group),
        "@end" = Token::Kw(Keyword::End),
        "@columns" = Token::Kw(Keyword::Columns),
        "@row" = Token::Kw(Keyword::Row),
        "@order" = Token::Kw(Keyword::Order),
        $ident => |lexer| {
            let token = Token::Ident(lexer.match_());
            lexer.return_(token)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Keyword::*;
    use Token::*;

    #[test]
    fn smoketest() {
        let input = "\
// operators
@group A = MUL, DIV;
@end DOLLAR;
@columns ID, A, DOLLAR;
@row A: <>.x; // trailing comment
@order ID, ｔｒｕｅ;
";
        let lexer = Lexer::new(input);
        let tokens = lexer
            .map(|res| res.map(|(_, t, _)| t))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert!(matches!(
            dbg!(&tokens[..]),
            [
                // @group ... ;
                Kw(Group),
                Ident("A"),
                Eq,
                Ident("MUL"),
                Comma,
                Ident("DIV"),
                Semicolon,
                // @end ... ;
                Kw(End),
                Ident("DOLLAR"),
                Semicolon,
                // @columns ... ;
                Kw(Columns),
                Ident("ID"),
                Comma,
                Ident("A"),
                Comma,
                Ident("DOLLAR"),
                Semicolon,
                // @row ... ;
                Kw(Row),
                Ident("A"),
                Colon,
                Lt,
                Gt,
                Dot,
                Ident("x"),
                Semicolon,
                // @order ... ;
                Kw(Order),
                Ident("ID"),
                Comma,
                Ident("ｔｒｕｅ"),
                Semicolon,
            ]
        ));
    }

    #[test]
    fn comment_at_end_of_input() {
        let tokens = Lexer::new("@end A; // trailing")
            .map(|res| res.map(|(_, t, _)| t))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(tokens, [Kw(End), Ident("A"), Semicolon]);

        let tokens = Lexer::new("//").collect::<Result<Vec<_>, _>>().unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn leading_underscore() {
        let tokens = Lexer::new("_A _1 __")
            .map(|res| res.map(|(_, t, _)| t))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(tokens, [Ident("_A"), Ident("_1"), Ident("__")]);
    }

    #[test]
    fn reject_unknown_character() {
        let result = Lexer::new("@row A: ?;").collect::<Result<Vec<_>, _>>();
        assert!(result.is_err());
    }
}
