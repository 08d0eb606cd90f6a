//! Evaluation throughput benchmarks.
//!
//! Compares the fluent and JSON-compiled forms of the same validator and
//! measures the cost of full versus property-scoped evaluation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use layer_guard::prelude::*;

#[derive(Debug, Clone)]
struct Customer {
    first_name: String,
    email: String,
    phone: String,
    age: i64,
}

impl Reflect for Customer {
    fn type_name() -> &'static str {
        "Customer"
    }

    fn properties() -> Vec<Property<Self>> {
        vec![
            Property::new("FirstName", |c: &Customer| c.first_name.clone()),
            Property::new("Email", |c: &Customer| c.email.clone()),
            Property::new("Phone", |c: &Customer| c.phone.clone()),
            Property::new("Age", |c: &Customer| c.age),
        ]
    }
}

const RULES: &str = r#"{
    "type": "Customer",
    "properties": {
        "FirstName": { "rules": [
            { "validator": "notEmpty", "message": "First name is required." },
            { "validator": "maxLength", "params": { "max": 50 }, "message": "Too long." }
        ] },
        "Email": { "rules": [
            { "validator": "notEmpty", "message": "Email is required." },
            { "validator": "email", "message": "Email is invalid." }
        ] },
        "Phone": { "rules": [
            { "validator": "phone", "message": "Phone is invalid.", "severity": "atOwnRisk",
              "layers": { "entity": "notRecommended" } }
        ] },
        "Age": { "rules": [
            { "validator": "inclusiveBetween", "params": { "from": 18, "to": 120 }, "message": "Age out of range." }
        ] }
    }
}"#;

fn fluent_validator() -> Validator<Customer> {
    Validator::<Customer>::builder()
        .rule_for("FirstName", |c: &Customer| c.first_name.clone(), |r| {
            r.not_empty().max_length(50)
        })
        .rule_for("Email", |c: &Customer| c.email.clone(), |r| {
            r.not_empty().email_address()
        })
        .rule_for("Phone", |c: &Customer| c.phone.clone(), |r| {
            r.phone()
                .with_severity(Severity::AtOwnRisk)
                .with_layer_severity("entity", Severity::NotRecommended)
        })
        .rule_for("Age", |c: &Customer| c.age, |r| r.inclusive_between(18, 120))
        .build()
        .unwrap()
}

/// Creates customers where every fourth one fails several rules.
fn create_customers(count: usize) -> Vec<Customer> {
    (0..count)
        .map(|i| {
            if i % 4 == 0 {
                Customer {
                    first_name: String::new(),
                    email: format!("user{i}.example.com"),
                    phone: "unknown".to_string(),
                    age: 7,
                }
            } else {
                Customer {
                    first_name: format!("User {i}"),
                    email: format!("user{i}@example.com"),
                    phone: format!("+3120{:07}", i % 10_000_000),
                    age: 18 + (i % 80) as i64,
                }
            }
        })
        .collect()
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let fluent = fluent_validator();
    let compiled = RuleSetCompiler::new().compile_str::<Customer>(RULES).unwrap();
    let ctx = ValidationContext::for_layer("entity");

    for size in [100, 1_000] {
        let customers = create_customers(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("fluent", size), &customers, |b, customers| {
            b.iter(|| {
                for customer in customers {
                    std::hint::black_box(fluent.validate_with(customer, &ctx));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("json", size), &customers, |b, customers| {
            b.iter(|| {
                for customer in customers {
                    std::hint::black_box(compiled.validate_with(customer, &ctx));
                }
            })
        });
    }

    group.finish();
}

fn bench_property_scope(c: &mut Criterion) {
    let mut group = c.benchmark_group("property_scope");
    let validator = fluent_validator();
    let customers = create_customers(1_000);

    group.bench_function("full", |b| {
        b.iter(|| {
            for customer in &customers {
                std::hint::black_box(validator.validate(customer));
            }
        })
    });

    group.bench_function("single_property", |b| {
        b.iter(|| {
            for customer in &customers {
                std::hint::black_box(validator.validate_property(customer, "email"));
            }
        })
    });

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let compiler = RuleSetCompiler::new();
    c.bench_function("compile_rule_set", |b| {
        b.iter(|| std::hint::black_box(compiler.compile_str::<Customer>(RULES).unwrap()))
    });
}

criterion_group!(benches, bench_validate, bench_property_scope, bench_compile);
criterion_main!(benches);
