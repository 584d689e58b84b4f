use dotenv::dotenv;
use finance_analytics_core::llm::FinancialAdvisor;
use finance_analytics_core::{Locale, RawTransaction};
use serde_json::json;
use std::error::Error;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let advisor = FinancialAdvisor::from_env(Locale::Es)?;

    let transactions = vec![
        RawTransaction::new("2024-03-01", 2400.0, Some("ingreso")),
        RawTransaction::new("2024-03-03", 650.0, Some("gasto")),
        RawTransaction::new("2024-03-12", 310.0, Some("gasto")),
        RawTransaction::new("2024-03-21", 180.0, Some("gasto")),
    ];
    let goals = vec![json!({ "nombre": "Fondo de emergencia", "monto_objetivo": 5000, "ahorrado": 1200 })];

    println!("💬 Asesor financiero listo (escribe 'salir' para terminar).");
    println!("------------------------------------------------------------------");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let query = input.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("salir") || query.eq_ignore_ascii_case("quit") {
            break;
        }

        let response = advisor.advise(&transactions, &goals, query).await;
        println!("\n🤖 {}\n", response.answer);
    }

    Ok(())
}
