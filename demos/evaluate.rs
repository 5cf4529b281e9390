use gateline::{decode, evaluate, Result};

fn main() -> Result<()> {
    let line = concat!(
        r#"{"azure.authenticated":"true","azure.role":"user","#,
        r#""azure.department":"Engineering","azure.groups":"developers,qa"}"#,
    );

    let record = decode(line)?;
    let verdict = evaluate(&record);
    println!("Result of evaluation: {verdict}");

    Ok(())
}
