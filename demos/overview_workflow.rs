use chrono::{Datelike, Utc};
use finance_analytics_core::*;
use std::error::Error;

fn sample_records() -> Vec<RawTransaction> {
    let mut records = Vec::new();
    let today = Utc::now().date_naive();

    for back in 0..8 {
        let month = utils::shift_months(utils::month_start(today), -back);
        let salary = 2400.0 + 50.0 * (8 - back) as f64;
        records.push(RawTransaction::new(
            month.format("%Y-%m-%d").to_string(),
            salary,
            Some("ingreso"),
        ));

        let expenses = [
            (3, 650.0, "Alquiler"),
            (12, 280.0, "Supermercado"),
            (21, 95.5, "Ocio"),
        ];
        for (day, amount, label) in expenses {
            if let Some(date) = month.with_day(day) {
                let mut record = RawTransaction::new(
                    date.format("%Y-%m-%d").to_string(),
                    amount + back as f64 * 10.0,
                    Some("gasto"),
                );
                record.category_label = Some(label.to_string());
                records.push(record);
            }
        }
    }

    records
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let config = EngineConfig::from_json_str(r#"{ "locale": "es", "forecast": { "seed": 11 } }"#)?;
    let records = sample_records();

    println!("📊 Financial Overview");
    println!("═══════════════════════════════════════════════════════════════\n");

    let request = OverviewRequest {
        scope: "personal".to_string(),
        resource_id: None,
    };
    let report = OverviewProcessor::process(&request, "1", &records, config.locale)?;

    println!("   Income:   {:>10.2}", report.summary.total_income);
    println!("   Expenses: {:>10.2}", report.summary.total_expenses);
    println!(
        "   Balance:  {:>10.2} ({:.1}%)\n",
        report.summary.net_balance, report.summary.balance_percentage
    );

    println!("   Recent days:");
    for bucket in &report.daily_expenses {
        println!("     {:<14} {:>10.2}", bucket.date, bucket.amount);
    }
    println!("\n   Recent months:");
    for bucket in &report.monthly_expenses {
        println!("     {:<14} {:>10.2}", bucket.month, bucket.amount);
    }

    println!("\n🔮 What-if: +10% income, 150 less every month");
    println!("═══════════════════════════════════════════════════════════════\n");

    let processor = SimulationProcessor::from_config(&config)?;
    let params = SimulationParameters {
        income_change_percent: 10.0,
        expense_cut_flat: 150.0,
    };
    let simulation = processor.run_now(&records, &params)?;

    println!("   {}\n", simulation.summary);
    for point in &simulation.projected_data {
        println!(
            "     {}  {:>10.2}  [{:>10.2}, {:>10.2}]",
            point.date, point.projected_amount, point.lower_bound, point.upper_bound
        );
    }

    Ok(())
}
