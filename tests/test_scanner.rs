use recipe_sql::scanner::{Event, ScanState, Scanner, StatementExtractor, extract_statements};

fn texts<'a>(sql: &'a str) -> Vec<&'a str> {
    extract_statements(sql, "receipts")
        .unwrap()
        .into_iter()
        .map(|statement| statement.text)
        .collect()
}

#[test]
fn test_doubled_quote_is_one_unit() {
    let events: Vec<_> = Scanner::new("'a''b'").collect();
    assert_eq!(
        events,
        vec![
            Event::StringStart('\''),
            Event::Char('a'),
            Event::EscapedQuote('\''),
            Event::Char('b'),
            Event::StringEnd('\''),
        ]
    );
}

#[test]
fn test_backslash_is_plain_text() {
    let mut scanner = Scanner::new(r"'C:\', 'x'");
    let events: Vec<_> = scanner.by_ref().collect();
    assert_eq!(
        &events[..4],
        &[
            Event::StringStart('\''),
            Event::Char('C'),
            Event::Char(':'),
            Event::Char('\\'),
        ]
    );
    assert_eq!(events[4], Event::StringEnd('\''));
    assert_eq!(events.iter().filter(|e| **e == Event::Comma).count(), 1);
    assert_eq!(scanner.state(), ScanState::Normal);
}

#[test]
fn test_extract_after_trailing_backslash() {
    let sql = r"
        INSERT INTO receipts VALUES ('Folder C:\', 1);
        INSERT INTO receipts VALUES ('b', 2);
    ";
    assert_eq!(texts(sql), vec![r"'Folder C:\', 1", "'b', 2"]);
}

#[test]
fn test_structure_inside_strings_is_ignored() {
    let mut scanner = Scanner::new(r#"('(', "[", ')', ",")"#);
    let events: Vec<_> = scanner.by_ref().collect();

    assert_eq!(events.iter().filter(|e| **e == Event::LeftParen).count(), 1);
    assert_eq!(events.iter().filter(|e| **e == Event::RightParen).count(), 1);
    assert_eq!(events.iter().filter(|e| **e == Event::LeftSquare).count(), 0);
    assert_eq!(events.iter().filter(|e| **e == Event::Comma).count(), 3);
    assert!(scanner.is_top_level());
    assert!(scanner.is_at_end());
}

#[test]
fn test_depth_tracking() {
    let mut scanner = Scanner::new("([a, (b)]");
    let mut max_paren = 0;
    let mut max_bracket = 0;
    while scanner.next_event().is_some() {
        max_paren = max_paren.max(scanner.paren_depth());
        max_bracket = max_bracket.max(scanner.bracket_depth());
    }
    assert_eq!(max_paren, 2);
    assert_eq!(max_bracket, 1);
    assert_eq!(scanner.paren_depth(), 1);
    assert_eq!(scanner.bracket_depth(), 0);
}

#[test]
fn test_multibyte_text() {
    let statement = "'Sayur asem — segar', 'ñ'";
    let events: Vec<_> = Scanner::new(statement).collect();
    assert!(events.contains(&Event::Char('—')));
    assert_eq!(events.iter().filter(|e| **e == Event::Comma).count(), 1);
}

#[test]
fn test_extract_nothing() {
    assert!(texts("").is_empty());
    assert!(texts("SELECT * FROM receipts;").is_empty());
    assert!(texts("INSERT INTO users VALUES ('a');").is_empty());
}

#[test]
fn test_extract_statements() {
    let sql = "
        INSERT INTO receipts VALUES ('a', 1);
        INSERT INTO users VALUES ('skip', 2);
        INSERT INTO receipts (title, kcal) VALUES ('b', (1 + 2));
    ";
    let statements = extract_statements(sql, "receipts").unwrap();

    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].ordinal, 0);
    assert_eq!(statements[0].text, "'a', 1");
    assert_eq!(statements[1].ordinal, 1);
    assert_eq!(statements[1].text, "'b', (1 + 2)");
}

#[test]
fn test_extract_ignores_delimiters_in_strings() {
    let sql = r#"INSERT INTO receipts VALUES ('a;b', 'c)', "d("); INSERT INTO receipts VALUES ('it''s');"#;
    assert_eq!(texts(sql), vec![r#"'a;b', 'c)', "d(""#, "'it''s'"]);
}

#[test]
fn test_extract_table_name_forms() {
    let sql = "
        INSERT INTO receipts_backup VALUES ('backup');
        INSERT  INTO
            `receipts` VALUES ('quoted');
        INSERT INTO \"receipts\" VALUES ('double');
    ";
    assert_eq!(texts(sql), vec!["'quoted'", "'double'"]);
}

#[test]
fn test_extract_stops_on_unterminated_block() {
    let sql = "
        INSERT INTO receipts VALUES ('a', 1);
        INSERT INTO receipts VALUES ('b, 2);
    ";
    assert_eq!(texts(sql), vec!["'a', 1"]);

    let unbalanced = "INSERT INTO receipts VALUES ('a', (1, 2);";
    assert!(texts(unbalanced).is_empty());
}

#[test]
fn test_extract_requires_semicolon() {
    assert!(texts("INSERT INTO receipts VALUES ('a', 1)").is_empty());
}

#[test]
fn test_extracted_statements_are_balanced() {
    let sql = "
        INSERT INTO receipts VALUES ('x (', [1, (2)], f(g(3)), ')');
        INSERT INTO receipts VALUES (((1)), '((', \"))\");
    ";
    let extractor = StatementExtractor::new("receipts").unwrap();
    let statements = extractor.extract(sql);
    assert_eq!(statements.len(), 2);

    for statement in statements {
        let mut scanner = Scanner::new(statement.text);
        while scanner.next_event().is_some() {
            assert!(scanner.paren_depth() >= 0, "{}", statement.text);
        }
        assert_eq!(scanner.paren_depth(), 0, "{}", statement.text);
        assert_eq!(scanner.state(), ScanState::Normal, "{}", statement.text);
    }
}
