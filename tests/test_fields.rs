use recipe_sql::{
    fields::{clean_string, parse_calories, split_fields},
    scanner::{Event, Scanner},
};

#[test]
fn test_split_on_top_level_commas_only() {
    let cases: [(&str, Vec<&str>); 5] = [
        ("a, b, c", vec!["a", "b", "c"]),
        (
            "'x, y', [1, 2], (3, 4), z",
            vec!["'x, y'", "[1, 2]", "(3, 4)", "z"],
        ),
        (
            r#"'it''s, ok', "q, ""r""", f(a, [b, c])"#,
            vec!["'it''s, ok'", r#""q, ""r""""#, "f(a, [b, c])"],
        ),
        ("a,,b", vec!["a", "", "b"]),
        (" 'trailing' , ", vec!["'trailing'"]),
    ];

    for (statement, expected) in cases {
        assert_eq!(split_fields(statement), expected, "{}", statement);
    }
}

#[test]
fn test_split_field_count_follows_top_level_commas() {
    let statements = [
        "'Nasi, Goreng', 'http://x/a.jpg', '1; 2', '[''1 a | 2 b'']', 'l', 'm', 100",
        "1, [2, [3, 4]], (5, (6, 7)), '8, (9', \"10, ]\"",
        r"'C:\', 'x', 'y'",
        "only",
    ];
    for statement in statements {
        let mut scanner = Scanner::new(statement);
        let mut top_level_commas = 0;
        while let Some(event) = scanner.next_event() {
            if event == Event::Comma && scanner.is_top_level() {
                top_level_commas += 1;
            }
        }
        assert_eq!(
            split_fields(statement).len(),
            top_level_commas + 1,
            "{}",
            statement
        );
    }

    assert_eq!(split_fields(statements[0]).len(), 7);
    assert_eq!(split_fields(statements[1]).len(), 5);
    assert_eq!(split_fields(statements[2]), vec![r"'C:\'", "'x'", "'y'"]);
}

#[test]
fn test_clean_string() {
    let cases = [
        ("'Nasi Goreng'", "Nasi Goreng"),
        ("\"double\"", "double"),
        ("`tick`", "tick"),
        ("'''triple'''", "triple"),
        ("  'padded'  ", "padded"),
        ("'Mom''s'", "Mom''s"),
        (r"it\'s", "it's"),
        // the trailing quote goes with the outer run before unescaping
        (r#"say \"hi\""#, r#"say "hi\"#),
        (r#"say \"hi\" now"#, r#"say "hi" now"#),
        (r"a\\b", r"a\b"),
        ("", ""),
        ("''", ""),
        ("NULL", "NULL"),
    ];
    for (raw, expected) in cases {
        assert_eq!(clean_string(raw), expected, "{}", raw);
    }
}

#[test]
fn test_clean_string_is_idempotent() {
    for raw in [
        "Nasi Goreng",
        "'Nasi Goreng'",
        "https://img.example/a.jpg",
        "2 piring nasi; 1 butir telur",
        "1 Aduk [Gambar: http://a.jpg] | 2 Sajikan",
        "",
    ] {
        let once = clean_string(raw);
        assert_eq!(clean_string(&once), once, "{}", raw);
    }
}

#[test]
fn test_parse_calories() {
    let cases = [
        ("450", 450.0),
        ("'250.5'", 250.5),
        ("'300 kcal'", 300.0),
        ("1e3", 1000.0),
        ("1e", 1.0),
        ("-", 0.0),
        ("NULL", 0.0),
        ("''", 0.0),
        ("", 0.0),
    ];
    for (raw, expected) in cases {
        assert_eq!(parse_calories(raw), expected, "{}", raw);
    }
}
