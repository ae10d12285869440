//! Walkthrough of the rule shapes, custom rules and the request contract

use param_validation::logging::{init_logging, LoggingConfig};
use param_validation::{
    CheckResult, RequestError, RequestParams, RuleError, Validator, ValidatorConfig,
};
use serde_json::{json, Value};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig::default().with_env_filter("param_validation=trace"))?;

    println!("🦀 param-validation Demo");
    println!("========================\n");

    demo_rule_shapes()?;
    demo_custom_rules()?;
    demo_request_contract()?;
    demo_configuration_errors();

    println!("✅ All validation demos completed successfully!");
    Ok(())
}

fn demo_rule_shapes() -> Result<(), RuleError> {
    println!("📝 Demo 1: Rule shapes");
    println!("----------------------");

    let validator = Validator::with_config(ValidatorConfig::extended());
    let rules = json!({
        "name": "string",
        "age": { "type": "int", "min": 0, "max": 120 },
        "tag": ["string", "number"],
        "code": { "type": "reg", "pattern": "^[A-Z]{3}$" }
    });
    let data = json!({ "name": 42, "age": 150, "tag": false, "code": "abc" });

    match validator.validate(&rules, &data)? {
        Some(errors) => println!("{}\n", errors),
        None => println!("all fields valid\n"),
    }
    Ok(())
}

fn demo_custom_rules() -> Result<(), RuleError> {
    println!("🔧 Demo 2: Custom rules");
    println!("-----------------------");

    let mut validator = Validator::new();
    validator.add_rule_fn("even", |_rule, value| match value.and_then(Value::as_i64) {
        Some(n) if n % 2 == 0 => CheckResult::Valid,
        Some(_) => CheckResult::message("should be even"),
        None => CheckResult::Invalid,
    })?;

    let rules = json!({ "a": "even", "b": "even", "c": "even" });
    if let Some(errors) = validator.validate(&rules, &json!({ "a": 4, "b": 5, "c": "six" }))? {
        for error in &errors {
            println!("  {}", error);
        }
    }
    println!();
    Ok(())
}

fn demo_request_contract() -> Result<(), RuleError> {
    println!("🌐 Demo 3: Request contract");
    println!("---------------------------");

    let validator = Validator::new();
    let rules = json!({ "page": "int", "q": "string" });
    let query = json!({ "page": "two", "q": "rust" });
    let params = RequestParams::new("GET").query(query.as_object().cloned().unwrap_or_default());

    match validator.validate_request(&rules, &params, None) {
        Ok(()) => println!("request accepted"),
        Err(RequestError::Invalid(failed)) => {
            println!("{} {}: {}", failed.status(), failed.message(), failed.to_json())
        }
        Err(RequestError::Rule(err)) => return Err(err),
    }
    println!();
    Ok(())
}

fn demo_configuration_errors() {
    println!("⚠️  Demo 4: Configuration errors");
    println!("-------------------------------");

    let validator = Validator::new();
    if let Err(err) = validator.validate(&json!({ "email": "email" }), &json!({})) {
        println!("{}", err);
    }
    if let Err(err) = validator.validate(&json!("number"), &json!({})) {
        println!("{}", err);
    }
    println!();
}
