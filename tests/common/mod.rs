use cointill::config::MachineConfig;
use cointill::machine::VendingMachine;

/// The catalog and vault the scenario and CLI tests run against.
pub fn demo_config_json() -> &'static str {
    r#"{
        "denominations": [
            { "id": 1, "value": 10, "capacity": 100, "count": 50 },
            { "id": 2, "value": 5, "capacity": 100, "count": 50 },
            { "id": 3, "value": 1, "capacity": 500, "count": 100 }
        ],
        "products": [
            { "id": 101, "name": "Coke", "price": 15, "quantity": 10, "capacity": 10 },
            { "id": 102, "name": "Pepsi", "price": 12, "quantity": 5, "capacity": 5 },
            { "id": 103, "name": "Water", "price": 10, "quantity": 20, "capacity": 20 }
        ]
    }"#
}

pub fn demo_machine() -> VendingMachine {
    MachineConfig::from_reader(demo_config_json().as_bytes())
        .expect("demo config parses")
        .build()
        .expect("demo config builds")
}
