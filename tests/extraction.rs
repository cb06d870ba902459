//! Extraction results and error reporting for complete expressions

use trigex::trigger::formats::DEFAULT_REGISTRY;
use trigex::{parse_expression, ExpressionParser, FunctionReference, ParseResult, ParserOptions};

fn parse(expression: &str) -> ParseResult {
    parse_expression(expression, &ParserOptions::default())
}

fn function(
    expression: &str,
    position: usize,
    host: &str,
    item: &str,
    call: &str,
    params: &[&str],
) -> FunctionReference {
    let name_end = call.find('(').unwrap();
    FunctionReference {
        expression: expression.to_string(),
        position,
        host: host.to_string(),
        item: item.to_string(),
        function: call.to_string(),
        function_name: call[..name_end].to_string(),
        function_param: call[name_end + 1..call.len() - 1].to_string(),
        function_param_list: params.iter().map(|p| p.to_string()).collect(),
    }
}

fn macro_names(macros: &[trigex::MacroRef]) -> Vec<&str> {
    macros.iter().map(|m| m.expression.as_str()).collect()
}

#[test]
fn test_mixed_operands_in_source_order() {
    let result = parse(concat!(
        "({host1:key1.last(0)}/{host2:key2.last(5)})/10+2*{TRIGGER.VALUE}&{$USERMACRO1}+(-{$USERMACRO2})+",
        "-{$USERMACRO3}*-12K+12.5m"
    ));

    assert!(result.is_valid);
    assert_eq!(result.error, "");
    assert_eq!(
        result.expressions,
        vec![
            function("{host1:key1.last(0)}", 1, "host1", "key1", "last(0)", &["0"]),
            function("{host2:key2.last(5)}", 22, "host2", "key2", "last(5)", &["5"]),
        ]
    );
    assert_eq!(macro_names(&result.macros), vec!["{TRIGGER.VALUE}"]);
    assert_eq!(
        macro_names(&result.user_macros),
        vec!["{$USERMACRO1}", "{$USERMACRO2}", "{$USERMACRO3}"]
    );
    assert!(result.lld_macros.is_empty());
}

#[test]
fn test_quoted_and_bracketed_parameters() {
    let result = parse(concat!(
        "{hostA:keyA[1,2,3].str(\"abc\",123)}*{hostB:keyB.last(123,\"abc\",\"def\")}/",
        "{host:key[\"param\",\"abc\"].last(1,2,3,4,5)}+{host:key.diff()}+{TRIGGER.VALUE}/{$M}-",
        "{$M1234}*{$CUSTOM}-{TRIGGER.VALUE}"
    ));

    assert!(result.is_valid);
    assert_eq!(
        result.expressions,
        vec![
            function(
                "{hostA:keyA[1,2,3].str(\"abc\",123)}",
                0,
                "hostA",
                "keyA[1,2,3]",
                "str(\"abc\",123)",
                &["abc", "123"],
            ),
            function(
                "{hostB:keyB.last(123,\"abc\",\"def\")}",
                35,
                "hostB",
                "keyB",
                "last(123,\"abc\",\"def\")",
                &["123", "abc", "def"],
            ),
            function(
                "{host:key[\"param\",\"abc\"].last(1,2,3,4,5)}",
                70,
                "host",
                "key[\"param\",\"abc\"]",
                "last(1,2,3,4,5)",
                &["1", "2", "3", "4", "5"],
            ),
            function("{host:key.diff()}", 112, "host", "key", "diff()", &[""]),
        ]
    );
    assert_eq!(
        macro_names(&result.macros),
        vec!["{TRIGGER.VALUE}", "{TRIGGER.VALUE}"]
    );
    assert_eq!(
        macro_names(&result.user_macros),
        vec!["{$M}", "{$M1234}", "{$CUSTOM}"]
    );
}

#[test]
fn test_repeated_references_keep_duplicates() {
    let result = parse(concat!(
        "({host:key.last(1)}+(1/2+2*2-3|4)|23-34>{host:key.last(#1)}) + - ",
        "({host:key.last(1)}+(1/2+2*2-3|4)|23-34>{host:key.last(#1)})"
    ));

    assert!(result.is_valid);
    let positions: Vec<usize> = result.expressions.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![1, 40, 66, 105]);
    assert_eq!(result.expressions[1].function_param_list, vec!["#1"]);
    assert_eq!(result.expressions[0], {
        let mut first = result.expressions[2].clone();
        first.position = 1;
        first
    });
    assert_eq!(result.hosts(), vec!["host"]);
}

#[test]
fn test_macros_in_parameters_are_not_extracted() {
    let result = parse("{host:key[].str(\"{HOSTNAME1}\",{HOSTNAME2})}");

    assert!(result.is_valid);
    assert_eq!(
        result.expressions,
        vec![function(
            "{host:key[].str(\"{HOSTNAME1}\",{HOSTNAME2})}",
            0,
            "host",
            "key[]",
            "str(\"{HOSTNAME1}\",{HOSTNAME2})",
            &["{HOSTNAME1}", "{HOSTNAME2}"],
        )]
    );
    assert!(result.macros.is_empty());
    assert!(result.user_macros.is_empty());
}

#[test]
fn test_escaped_quote_in_function_parameter() {
    let result = parse(r#"{h:k.str("say \"hi\"",x\y)}=0"#);
    assert!(result.is_valid);
    assert_eq!(
        result.expressions[0].function_param_list,
        vec![r#"say "hi""#, r"x\y"]
    );
    assert_eq!(result.expressions[0].function_param, r#""say \"hi\"",x\y"#);
}

#[test]
fn test_item_key_is_verbatim() {
    let result = parse(r#"{h:k["a\"b", [c]].last(0)}"#);
    assert!(result.is_valid);
    assert_eq!(result.expressions[0].item, r#"k["a\"b", [c]]"#);
}

#[test]
fn test_error_messages() {
    let cases = [
        ("", "Incorrect trigger expression", None),
        ("abc", "Incorrect trigger expression", None),
        (
            "{host:key.last(0)}=",
            "Incorrect trigger expression. Check expression part starting from \"=\"",
            Some(18),
        ),
        ("{host:key.str())}=0", "Incorrect trigger expression", None),
        (
            "2*{host:key.str())}=0",
            "Incorrect trigger expression. Check expression part starting from \"*{host:key.str())}=0\"",
            Some(1),
        ),
        (
            "(1+2",
            "Incorrect trigger expression. Check expression part starting from \"2\"",
            Some(3),
        ),
        (
            "1)=2",
            "Incorrect trigger expression. Check expression part starting from \"1)=2\"",
            Some(0),
        ),
        (
            "{host:key.str(1)}=ГУГЛ",
            "Incorrect trigger expression. Check expression part starting from \"=ГУГЛ\"",
            Some(17),
        ),
    ];

    for (expression, error, position) in cases {
        let result = parse(expression);
        assert!(!result.is_valid, "{expression}");
        assert_eq!(result.error, error, "{expression}");
        assert_eq!(result.error_position, position, "{expression}");
        assert_eq!(result.reference_count(), 0, "{expression}");
    }
}

#[test]
fn test_parser_hosts_follow_last_parse() {
    let mut parser = ExpressionParser::default();
    parser.parse("{web 1:cpu.load.avg(5m)}>2 | {db:cpu.load.avg(5m)}>2 | {web 1:mem.free.last(0)}<1K");
    assert_eq!(parser.hosts(), vec!["web 1", "db"]);

    parser.parse("{TRIGGER.VALUE}=1");
    assert!(parser.hosts().is_empty());
    assert!(parser.last_result().unwrap().is_valid);
}

#[test]
fn test_registry_renders_every_format() {
    let result = parse("{h:k.last(0)}>{$LIMIT}");
    for name in DEFAULT_REGISTRY.list_formats() {
        let out = DEFAULT_REGISTRY.serialize(&result, &name).unwrap();
        assert!(out.contains("{$LIMIT}"), "{name}");
    }
}

#[test]
fn test_json_output_snapshot() {
    let result = parse("{Zabbix server:agent.ping.last(0)}=1");
    let out = DEFAULT_REGISTRY.serialize(&result, "json").unwrap();
    insta::assert_snapshot!(out, @r###"
    {
      "isValid": true,
      "error": "",
      "expressions": [
        {
          "expression": "{Zabbix server:agent.ping.last(0)}",
          "pos": 0,
          "host": "Zabbix server",
          "item": "agent.ping",
          "function": "last(0)",
          "functionName": "last",
          "functionParam": "0",
          "functionParamList": [
            "0"
          ]
        }
      ],
      "macros": [],
      "usermacros": [],
      "lldmacros": []
    }
    "###);
}
