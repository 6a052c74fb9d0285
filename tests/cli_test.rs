use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_cli_scripted_session() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("machine.json");
    let ops_path = dir.path().join("session.csv");

    std::fs::write(&config_path, common::demo_config_json())?;
    std::fs::write(
        &ops_path,
        "op,product,qty,value,count,name,price,capacity\n\
         insert,,,,,,,\n\
         select,101,1,,,,,\n\
         coin,,,10,2,,,\n\
         insert,,,,,,,\n\
         process,,,,,,,\n\
         catalog,,,,,,,\n",
    )?;

    let mut cmd = Command::new(cargo_bin!("cointill"));
    cmd.arg(&ops_path).arg("--config").arg(&config_path);

    cmd.assert()
        .success()
        // The out-of-order insert is rejected, the session continues.
        .stderr(predicate::str::contains("Error processing command"))
        // Receipt for the Coke purchase: 20 in, 5 back.
        .stdout(predicate::str::contains("\"total\":15"))
        .stdout(predicate::str::contains("\"change\":{\"5\":1}"))
        // Final ledgers reflect the settlement.
        .stdout(predicate::str::contains("id,name,price,quantity,capacity"))
        .stdout(predicate::str::contains("101,Coke,15,9,10"))
        .stdout(predicate::str::contains("id,value,capacity,count"))
        .stdout(predicate::str::contains("1,10,100,52"))
        .stdout(predicate::str::contains("2,5,100,49"));

    Ok(())
}

#[test]
fn test_cli_rejects_invalid_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("machine.json");
    let ops_path = dir.path().join("session.csv");

    // Duplicate denomination values cannot form a chain.
    std::fs::write(
        &config_path,
        r#"{
            "denominations": [
                { "id": 1, "value": 10, "capacity": 100 },
                { "id": 2, "value": 10, "capacity": 100 }
            ],
            "products": []
        }"#,
    )?;
    std::fs::write(&ops_path, "op,product,qty,value,count,name,price,capacity\n")?;

    let mut cmd = Command::new(cargo_bin!("cointill"));
    cmd.arg(&ops_path).arg("--config").arg(&config_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("duplicate denomination value"));

    Ok(())
}
