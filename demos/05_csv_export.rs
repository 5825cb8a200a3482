/// export a schedule as CSV and read it back
use mortgage_calc_rs::chrono::NaiveDate;
use mortgage_calc_rs::{read_schedule_csv, write_schedule_csv, generate_schedule, Decimal, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let schedule = generate_schedule(Money::from_major(200_000), Decimal::new(6, 0), 15, start)?;

    let mut buf = Vec::new();
    write_schedule_csv(&schedule.payments, &mut buf)?;
    let csv = String::from_utf8(buf)?;
    for line in csv.lines().take(4) {
        println!("{line}");
    }

    let rows = read_schedule_csv(csv.as_bytes())?;
    println!("read back {} rows, last balance {}", rows.len(), rows[rows.len() - 1].remaining_balance);
    Ok(())
}
