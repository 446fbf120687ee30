use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt, value},
    multi::many0,
    sequence::{delimited, pair, preceded},
    IResult,
};

use super::{CompareOp, Expression};

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_literal_char(c: char) -> bool {
    is_ident_char(c) || c == '.' || c == '-' || c == '+'
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(is_ident_char)(input)
}

fn literal(input: &str) -> IResult<&str, &str> {
    take_while1(is_literal_char)(input)
}

fn compare_op(input: &str) -> IResult<&str, CompareOp> {
    alt((
        value(CompareOp::Eq, tag("==")),
        value(CompareOp::Ne, tag("!=")),
        value(CompareOp::Ge, tag(">=")),
        value(CompareOp::Le, tag("<=")),
        value(CompareOp::Gt, tag(">")),
        value(CompareOp::Lt, tag("<")),
    ))(input)
}

fn term(input: &str) -> IResult<&str, Expression> {
    map(
        pair(ws(ident), opt(pair(ws(compare_op), ws(literal)))),
        |(name, comparison)| match (name, comparison) {
            (name, Some((op, literal))) => Expression::Comparison {
                attribute: name.to_string(),
                op,
                literal: literal.to_string(),
            },
            ("true", None) => Expression::Constant(true),
            ("false", None) => Expression::Constant(false),
            (name, None) => Expression::Variable(name.to_string()),
        },
    )(input)
}

fn unary(input: &str) -> IResult<&str, Expression> {
    alt((
        map(preceded(ws(char('!')), unary), |e| {
            Expression::Not(Box::new(e))
        }),
        delimited(ws(char('(')), or_expr, ws(char(')'))),
        term,
    ))(input)
}

fn and_expr(input: &str) -> IResult<&str, Expression> {
    let (input, first) = unary(input)?;
    let (input, rest) = many0(preceded(ws(tag("&&")), unary))(input)?;
    let expr = rest
        .into_iter()
        .fold(first, |acc, e| Expression::And(Box::new(acc), Box::new(e)));
    Ok((input, expr))
}

fn or_expr(input: &str) -> IResult<&str, Expression> {
    let (input, first) = and_expr(input)?;
    let (input, rest) = many0(preceded(ws(tag("||")), and_expr))(input)?;
    let expr = rest
        .into_iter()
        .fold(first, |acc, e| Expression::Or(Box::new(acc), Box::new(e)));
    Ok((input, expr))
}

/// parses a condition such as `road_class == PRIMARY && !toll`.
///
/// `&&` binds tighter than `||`, `!` applies to the following term or
/// parenthesized group. an empty condition is an error.
pub fn parse_condition(condition: &str) -> Result<Expression, String> {
    match all_consuming(ws(or_expr))(condition) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            if e.input.trim().is_empty() {
                Err(String::from("unexpected end of condition"))
            } else {
                Err(format!("unexpected input at '{}'", e.input.trim()))
            }
        }
        Err(nom::Err::Incomplete(_)) => Err(String::from("incomplete condition")),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cmp(attribute: &str, op: CompareOp, literal: &str) -> Expression {
        Expression::Comparison {
            attribute: attribute.to_string(),
            op,
            literal: literal.to_string(),
        }
    }

    #[test]
    fn test_parse_comparison() {
        let expr = parse_condition("road_class == PRIMARY").expect("should parse");
        assert_eq!(expr, cmp("road_class", CompareOp::Eq, "PRIMARY"));
        let expr = parse_condition("max_width<2.5").expect("should parse");
        assert_eq!(expr, cmp("max_width", CompareOp::Lt, "2.5"));
        let expr = parse_condition("car_average_speed >= 90").expect("should parse");
        assert_eq!(expr, cmp("car_average_speed", CompareOp::Ge, "90"));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let expr = parse_condition("a || b && c").expect("should parse");
        let expected = Expression::Or(
            Box::new(Expression::Variable("a".into())),
            Box::new(Expression::And(
                Box::new(Expression::Variable("b".into())),
                Box::new(Expression::Variable("c".into())),
            )),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_not_and_parentheses() {
        let expr = parse_condition("!(toll || in_city) && true").expect("should parse");
        let expected = Expression::And(
            Box::new(Expression::Not(Box::new(Expression::Or(
                Box::new(Expression::Variable("toll".into())),
                Box::new(Expression::Variable("in_city".into())),
            )))),
            Box::new(Expression::Constant(true)),
        );
        assert_eq!(expr, expected);
        let expr = parse_condition("road_class != MOTORWAY").expect("should parse");
        assert_eq!(expr, cmp("road_class", CompareOp::Ne, "MOTORWAY"));
    }

    #[test]
    fn test_rejects_malformed_conditions() {
        for condition in ["", "   ", "a &&", "(a || b", "a == ", "a b", "== 3", "a & b"] {
            assert!(
                parse_condition(condition).is_err(),
                "'{condition}' should not parse"
            );
        }
    }
}
