use plang::{evaluate, lex, parse, run, Error, EvalError, Number, ParseError, ParseOptions, TokenKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("1 + 2", Number::from(3))]
#[case("2 + 3 * 4", Number::from(14))]
#[case("2 * 3 + 4", Number::from(10))]
#[case("10 - 3 - 2", Number::from(5))]
#[case("12+7*2", Number::from(26))]
#[case("100 / 8 / 5", Number::Float(2.4))]
#[case("7/2", Number::Float(3.5))]
#[case("7*2", Number::from(14))]
#[case("6 / 3", Number::Float(2.0))]
#[case("7 / 2 * 2", Number::from(6))]
#[case("9007199254740993 / 3", Number::Float(3002399751580331.0))]
#[case("\t1\n+\n1 ", Number::from(2))]
fn evaluates(#[case] input: &str, #[case] expected: Number) {
    assert_eq!(evaluate(&parse(&lex(input)).unwrap()), Ok(expected));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("1 +")]
#[case("2 * 3 -")]
fn fails_at_end_of_input(#[case] input: &str) {
    assert!(matches!(
        parse(&lex(input)),
        Err(ParseError::UnexpectedEof { .. })
    ));
}

#[rstest]
#[case("1 + 2 3", ParseOptions::strict(), None)]
#[case("1 + 2 3", ParseOptions::permissive(), Some(Number::from(3)))]
#[case("4 * 2 )", ParseOptions::permissive(), Some(Number::from(8)))]
fn trailing_input(
    #[case] input: &str,
    #[case] options: ParseOptions,
    #[case] expected: Option<Number>,
) {
    match expected {
        Some(value) => assert_eq!(run(input, options).map(|(_, v)| v), Ok(value)),
        None => assert!(matches!(
            run(input, options),
            Err(Error::Parse(ParseError::TrailingInput { .. }))
        )),
    }
}

#[test]
fn non_numeric_literal() {
    assert!(matches!(
        run("1 + +", ParseOptions::strict()),
        Err(Error::Parse(ParseError::ExpectedLiteral { .. }))
    ));
    assert!(matches!(
        run("1 + +", ParseOptions::permissive()),
        Err(Error::Eval(EvalError::InvalidLiteral { .. }))
    ));
}

#[test]
fn end_to_end() {
    let source = "12+7*2";

    let tokens = lex(source);
    let kinds: Vec<_> = tokens.iter().map(|t| (t.kind, t.slice)).collect();
    assert_eq!(
        kinds,
        vec![
            (TokenKind::Number, "12"),
            (TokenKind::Plus, "+"),
            (TokenKind::Number, "7"),
            (TokenKind::Star, "*"),
            (TokenKind::Number, "2"),
        ]
    );

    let expr = parse(&tokens).unwrap();
    assert_eq!(expr.to_string(), "(+ 12 (* 7 2))");
    assert_eq!(
        serde_json::to_string(&expr).unwrap(),
        r#"{"type":"BinOp","operator":"+","left":{"type":"Literal","value":"12"},"right":{"type":"BinOp","operator":"*","left":{"type":"Literal","value":"7"},"right":{"type":"Literal","value":"2"}}}"#
    );

    assert_eq!(evaluate(&expr), Ok(Number::from(26)));
}

#[rstest]
#[case("0")]
#[case("7")]
#[case("1000000")]
#[case("0000")]
#[case("10203040506070809")]
#[case("90000000000000000000000000000000000000000001")]
fn digit_run_is_one_number(#[case] input: &str) {
    let tokens = lex(input);
    assert_eq!(tokens.len(), 1);
    assert_eq!((tokens[0].kind, tokens[0].slice), (TokenKind::Number, input));
}

#[rstest]
#[case(" 3 * 41 -  5/ 926 + 0 ")]
#[case("1+2-3*4/5")]
#[case("\t100\n/\n002 *\t30 - 4")]
#[case("+-*/")]
#[case("  / 9 9 +  ")]
#[case("")]
#[case("\n\t \n")]
#[case("305 *0* 1010")]
fn lexing_keeps_order(#[case] source: &str) {
    let meaningful: String = source.chars().filter(|c| !c.is_whitespace()).collect();
    let joined: String = lex(source).iter().map(|t| t.slice).collect();
    assert_eq!(joined, meaningful);
    assert!(lex(source)
        .iter()
        .all(|t| !matches!(t.kind, TokenKind::Other(_))));
}

#[test]
fn lone_literal_is_not_evaluated() {
    assert!(matches!(
        run("42", ParseOptions::strict()),
        Err(Error::Eval(EvalError::UnableToEvaluate { .. }))
    ));
}

#[test]
fn division_by_zero() {
    assert!(matches!(
        run("5 - 1 / 0", ParseOptions::strict()),
        Err(Error::Eval(EvalError::DivisionByZero { .. }))
    ));
}
