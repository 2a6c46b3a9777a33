// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成钢板清单测试数据集CSV文件
// 输出: tests/fixtures/datasets/*.csv
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};
use csv::Writer;
use std::error::Error;
use std::fs::{self, File};

const OUTPUT_DIR: &str = "tests/fixtures/datasets";

// CSV 表头（标准列名）
const CSV_HEADER: &[&str] = &[
    "Plate No",
    "Rolling Time",
    "Thickness",
    "Edge Condition",
    "UT",
    "Supply Condition",
];

// CSV 表头（中文列名）
const CSV_HEADER_ZH: &[&str] = &["钢板号", "轧制时间", "厚度", "边部状态", "探伤", "交货状态"];

// 钢板记录结构
#[derive(Clone)]
struct PlateRow {
    plate_no: String,
    rolling_time: String,
    thickness: String,
    edge_condition: String,
    ut: String,
    supply_condition: String,
}

impl PlateRow {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.plate_no.clone(),
            self.rolling_time.clone(),
            self.thickness.clone(),
            self.edge_condition.clone(),
            self.ut.clone(),
            self.supply_condition.clone(),
        ]
    }
}

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .and_then(|d| d.and_hms_opt(6, 0, 0))
        .unwrap_or_default()
}

fn generate_normal_record(index: usize) -> PlateRow {
    let rolling_time = base_time() + Duration::minutes(7 * index as i64);
    PlateRow {
        plate_no: format!("PL{:05}", index + 1),
        rolling_time: rolling_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        thickness: format!("{:.1}", 8.0 + (index % 23) as f64 * 3.5),
        edge_condition: ["Trimmed", "Mill Edge"][index % 2].to_string(),
        ut: ["", "Y", ""][index % 3].to_string(),
        supply_condition: ["As Rolled", "Normalized", "normalized", "TMCP"][index % 4].to_string(),
    }
}

fn write_dataset(name: &str, header: &[&str], rows: &[PlateRow]) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/{}", OUTPUT_DIR, name);
    let file = File::create(&path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row.to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 {} ({}条)", name, rows.len());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成测试数据集...");
    fs::create_dir_all(OUTPUT_DIR)?;

    // 1. 正常数据 (100条)
    let normal: Vec<_> = (0..100).map(generate_normal_record).collect();
    write_dataset("01_normal_data.csv", CSV_HEADER, &normal)?;

    // 2. 大数据集 (2000条)
    let large: Vec<_> = (0..2000).map(generate_normal_record).collect();
    write_dataset("02_large_dataset.csv", CSV_HEADER, &large)?;

    // 3. 常化密集（全部厚板常化，考验组炉）
    write_dataset("03_heavy_normalizing.csv", CSV_HEADER, &generate_heavy_normalizing())?;

    // 4. 缺失必填字段
    write_dataset("04_missing_required_fields.csv", CSV_HEADER, &generate_missing_required_fields())?;

    // 5. 数据类型错误
    write_dataset("05_invalid_data_types.csv", CSV_HEADER, &generate_invalid_data_types())?;

    // 6. 边界情况
    write_dataset("06_edge_cases.csv", CSV_HEADER, &generate_edge_cases())?;

    // 7. 中文表头
    let zh: Vec<_> = (0..20).map(generate_normal_record).collect();
    write_dataset("07_chinese_headers.csv", CSV_HEADER_ZH, &zh)?;

    println!("✓ 所有测试数据集生成完成！");
    Ok(())
}

fn generate_heavy_normalizing() -> Vec<PlateRow> {
    (0..200)
        .map(|i| {
            let mut row = generate_normal_record(i);
            row.thickness = format!("{:.1}", 20.0 + (i % 9) as f64 * 15.0);
            row.supply_condition = "Normalized".to_string();
            row
        })
        .collect()
}

fn generate_missing_required_fields() -> Vec<PlateRow> {
    let mut rows: Vec<_> = (0..10).map(generate_normal_record).collect();
    rows[2].rolling_time = String::new();
    rows[5].thickness = String::new();
    rows[7].rolling_time = String::new();
    rows[7].thickness = String::new();
    rows
}

fn generate_invalid_data_types() -> Vec<PlateRow> {
    let mut rows: Vec<_> = (0..10).map(generate_normal_record).collect();
    rows[1].thickness = "abc".to_string();
    rows[3].thickness = "-12".to_string();
    rows[4].rolling_time = "today".to_string();
    rows[8].rolling_time = "2026-13-45 25:61:00".to_string();
    rows
}

fn generate_edge_cases() -> Vec<PlateRow> {
    // 厚度临界值: 常化下限 / 剪切与分组阈值 / 超出炉容量
    let cases: [(&str, &str, &str, &str); 8] = [
        ("14", "Trimmed", "", "Normalized"),
        ("13.9", "Trimmed", "", "Normalized"),
        ("40", "Trimmed", "Y", "As Rolled"),
        ("40.5", "Trimmed", "Y", "As Rolled"),
        ("39.9", "untrimmed", " ", "normalized"),
        ("1700", "Mill Edge", "", "Normalized"),
        ("900", "Mill Edge", "", "Normalized"),
        ("60", "Trimmed", "Y", " NORMALIZED "),
    ];

    cases
        .iter()
        .enumerate()
        .map(|(i, (thickness, edge, ut, supply))| PlateRow {
            plate_no: format!("EDGE{:02}", i + 1),
            // 序列日期（46082.25 = 2026-03-01 06:00）
            rolling_time: if i == 0 {
                "46082.25".to_string()
            } else {
                (base_time() + Duration::minutes(i as i64))
                    .format("%Y/%m/%d %H:%M")
                    .to_string()
            },
            thickness: thickness.to_string(),
            edge_condition: edge.to_string(),
            ut: ut.to_string(),
            supply_condition: supply.to_string(),
        })
        .collect()
}
