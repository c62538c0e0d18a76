use serde_json::{json, Value};

/// The parameters table as the host sends it.
pub fn header_record() -> Value {
    json!({
        "Montant": 100000,
        "TauxAnnuel": 0.035,
        "Mensualité": null,
        "Duree_Mois": 120,
        "TotalInterets": 18662.4,
        "CoutTotal": 118662.4
    })
}

/// `count` monthly rows starting in January 2024.
pub fn schedule_records(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|n| {
            let month = (n - 1) % 12 + 1;
            let year = 2024 + (n - 1) / 12;
            json!({
                "Numero": n,
                "Date": format!("{:04}-{:02}-05", year, month),
                "CapitalInitial": 100000.0 - (n as f64 - 1.0) * 700.0,
                "Interets": 291.67,
                "MontantFrais": 0,
                "CapitalRembourse": 697.21,
                "CapitalFinal": 100000.0 - n as f64 * 700.0,
                "Mensualite": 988.88
            })
        })
        .collect()
}

/// A tables document `{ "PARAMÈTRES": [...], "ECHÉANCIER": [...] }`.
pub fn tables_document(rows: usize) -> Value {
    json!({
        "PARAMÈTRES": [header_record()],
        "ECHÉANCIER": schedule_records(rows)
    })
}
