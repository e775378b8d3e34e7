#![no_main]
#![allow(missing_docs)]

use anyhow::Result;
use libfuzzer_sys::fuzz_target;

fn resolve(name: &str) -> Option<String> {
    match name.len() % 3 {
        0 => None,
        1 => Some(String::new()),
        _ => Some(format!("{name}.value.{name}")),
    }
}

fn evaluate(input: &str) -> Result<()> {
    let Ok(template) = envsubst_core::parse(input) else {
        return Ok(());
    };

    // Runtime failures (e.g. `${v:?}`) are expected; only panics and
    // non-deterministic results are bugs.
    let first = template.execute(&mut resolve);
    let second = template.execute(&mut resolve);

    match (first, second) {
        (Ok(a), Ok(b)) if a != b => Err(anyhow::anyhow!("non-deterministic output: '{a}' vs '{b}'")),
        (Ok(_), Err(e)) | (Err(e), Ok(_)) => Err(anyhow::anyhow!("inconsistent failure: {e}")),
        _ => Ok(()),
    }
}

fuzz_target!(|input: String| {
    evaluate(&input).unwrap();
});
