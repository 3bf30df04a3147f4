// Example demonstrating parsing and walking a tree

use ezjson::{parse_str, ParseError, Value};

fn describe(value: &Value, depth: usize) {
    let pad = "  ".repeat(depth);
    match value {
        Value::Object(members) => {
            println!("{pad}Object ({} members)", members.len());
            for (key, member) in members {
                println!("{pad}  Key: '{key}'");
                describe(member, depth + 2);
            }
        }
        Value::Array(items) => {
            println!("{pad}Array ({} items)", items.len());
            for item in items {
                describe(item, depth + 1);
            }
        }
        Value::String(s) => println!("{pad}String: '{s}'"),
        Value::Int(n) => println!("{pad}Int: {n}"),
        Value::Float(f) => println!("{pad}Float: {f}"),
        Value::StrNum(s) => println!("{pad}Number text: {s}"),
        Value::Bool(b) => println!("{pad}Bool: {b}"),
        Value::Null => println!("{pad}Null"),
    }
}

fn main() -> Result<(), ParseError> {
    let json = r#"{"name": "value", "number": 42, "mask": 0xFF, "ratio": 0.25, "flag": true, "tags": ["a", "b"]}"#;
    println!("Input: {json}");

    let doc = parse_str(json)?;
    describe(&doc, 0);

    println!();
    println!("Written back:");
    println!("{doc}");

    match parse_str(r#"{"broken": [1, 2.3.4]}"#) {
        Ok(_) => println!("unexpectedly parsed"),
        Err(e) => println!("Error {:#x}: {e}", e.code()),
    }

    println!("Released {} nodes", doc.release());
    Ok(())
}
