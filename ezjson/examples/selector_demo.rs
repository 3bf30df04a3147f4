// Example demonstrating path selection with wildcards

use ezjson::{parse_str, select, ParseError, Value};

fn main() -> Result<(), ParseError> {
    let json = r#"
    {
        "servers": [
            {"name": "alpha", "port": 8080, "weight_eu": 0.7, "weight_us": 0.3},
            {"name": "beta", "port": 8081, "weight_eu": 0.2, "weight_us": 0.8}
        ]
    }"#;
    let doc = parse_str(json)?;

    let first = select(&doc, ".servers[0].name:s", &[]).and_then(Value::as_str);
    println!("First server: {first:?}");

    for i in 0..doc.get("servers").map_or(0, Value::len) {
        for region in ["eu", "us"] {
            let weight = select!(&doc, ".servers[*].weight_*:f", i, region);
            println!("servers[{i}] {region}: {:?}", weight.and_then(Value::as_f64));
        }
    }

    // Wrong type, missing node and out of range all come back as None.
    println!("{:?}", select(&doc, ".servers[0].port:s", &[]));
    println!("{:?}", select(&doc, ".servers[0].host", &[]));
    println!("{:?}", select!(&doc, ".servers[*]", 5));
    Ok(())
}
