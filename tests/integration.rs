//! Integration tests for phone number lookups.

use phonedata::binary::{DataFileWriter, SourceRow, PHONE_INDEX_LENGTH};
use phonedata::{
    find, AreaCode, AreaCodeTable, Config, DataFile, Error, LoadError, Locality, PhoneRecord,
    UNKNOWN_CARRIER_LABEL,
};
use std::fs;

const SOURCE: &str = "\
# prefix|province|city|zip|area|carrier
1300000|北京|北京|100000|010|CUCC
1380013|广东|广州|510000|020|CMCC
1530000|上海|上海|200000|021|CTCC
1700000|浙江|杭州|310000|0571|CTCC_v
1760008|北京|北京|100000|010|2
1990000|四川|成都|610000|028|99
";

fn build_data() -> DataFile {
    let writer = DataFileWriter::from_source(SOURCE.as_bytes(), *b"2301").unwrap();
    DataFile::from_bytes(writer.build().unwrap()).unwrap()
}

fn area_codes() -> AreaCodeTable {
    AreaCodeTable::from_rows([
        AreaCode::new("北京", "北京", "010"),
        AreaCode::new("上海", "上海", "021"),
        AreaCode::new("广东", "深圳", "0755"),
    ])
}

#[test]
fn test_load_and_find_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("phone.txt");
    let data_path = dir.path().join("phone.dat");
    fs::write(&source_path, SOURCE).unwrap();

    let writer =
        DataFileWriter::from_source(fs::File::open(&source_path).unwrap(), *b"2301").unwrap();
    fs::write(&data_path, writer.build().unwrap()).unwrap();

    let data = DataFile::load(&data_path).unwrap();
    assert_eq!(data.version_str(), "2301");
    assert_eq!(data.total_entries(), 6);
    assert_eq!(
        data.len() - data.first_index_offset() as usize,
        6 * PHONE_INDEX_LENGTH
    );

    let pr = find(&data, "17600082595", "", None).unwrap();
    assert_eq!(pr.province, "北京");
    assert_eq!(pr.card_type, "中国联通");
}

#[test]
fn test_load_missing_file_is_fatal() {
    let result = DataFile::load("/nonexistent/phone.dat");
    assert!(matches!(result, Err(LoadError::NotFound(_))));
}

#[test]
fn test_mobile_lookup_fields() {
    let data = build_data();
    let pr = find(&data, "13800138000", "020", None).unwrap();
    assert_eq!(
        pr,
        PhoneRecord {
            phone_num: "13800138000".to_string(),
            province: "广东".to_string(),
            city: "广州".to_string(),
            zip_code: "510000".to_string(),
            area_zone: "020".to_string(),
            card_type: "中国移动".to_string(),
            locality: Locality::Local,
        }
    );
}

#[test]
fn test_leading_zero_is_stripped() {
    let data = build_data();
    let pr = find(&data, "013800138000", "", None).unwrap();
    assert_eq!(pr.phone_num, "13800138000");
    assert_eq!(pr.city, "广州");
}

#[test]
fn test_twelve_digit_non_mobile_is_landline() {
    let data = build_data();
    let table = area_codes();
    let pr = find(&data, "075512345678", "", Some(&table)).unwrap();
    assert_eq!(pr.city, "深圳");
    assert_eq!(pr.area_zone, "0755");
    assert!(pr.card_type.is_empty());
}

#[test]
fn test_short_numbers_are_local() {
    let data = build_data();
    for number in ["1234567", "12345678"] {
        let pr = find(&data, number, "", None).unwrap();
        assert_eq!(pr.locality, Locality::Local);
        assert!(pr.province.is_empty());
        assert!(pr.city.is_empty());
        assert!(pr.zip_code.is_empty());
        assert!(pr.card_type.is_empty());
    }
}

#[test]
fn test_out_of_range_lengths() {
    let data = build_data();
    for number in ["123", "1380013800000", "", "123456789"] {
        assert!(
            matches!(
                find(&data, number, "", None),
                Err(Error::UnknownNumberFormat(_))
            ),
            "{}",
            number
        );
    }
}

#[test]
fn test_invalid_characters() {
    let data = build_data();

    let pr = find(&data, "123-567", "", None).unwrap();
    assert_eq!(pr, PhoneRecord::bare("123-567", Locality::Local));

    let pr = find(&data, "1380013800x", "", None).unwrap();
    assert_eq!(pr.city, "广州");

    assert!(matches!(
        find(&data, "138a0138000", "", None),
        Err(Error::InvalidNumber(n)) if n == "138a013"
    ));
}

#[test]
fn test_locality_flag() {
    let data = build_data();
    let pr = find(&data, "15300001234", "021-xyz", None).unwrap();
    assert_eq!(pr.area_zone, "021");
    assert_eq!(pr.locality, Locality::Local);

    let pr = find(&data, "15300001234", "010", None).unwrap();
    assert_eq!(pr.locality, Locality::Domestic);
}

#[test]
fn test_unknown_carrier_is_tolerated() {
    let data = build_data();
    let pr = find(&data, "19900001234", "", None).unwrap();
    assert_eq!(pr.city, "成都");
    assert_eq!(pr.card_type, UNKNOWN_CARRIER_LABEL);
}

#[test]
fn test_virtual_carrier() {
    let data = build_data();
    let pr = find(&data, "17000001234", "", None).unwrap();
    assert_eq!(pr.card_type, "中国电信虚拟运营商");
}

#[test]
fn test_not_found() {
    let data = build_data();
    assert!(matches!(
        find(&data, "18612345678", "", None),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_landline_locality() {
    let data = build_data();
    let table = area_codes();

    let pr = find(&data, "01012345678", "010", Some(&table)).unwrap();
    assert_eq!(pr.province, "北京");
    assert_eq!(pr.locality, Locality::Local);

    let pr = find(&data, "02112345678", "010", Some(&table)).unwrap();
    assert_eq!(pr.province, "上海");
    assert_eq!(pr.locality, Locality::Domestic);
}

#[test]
fn test_config_driven_setup() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("phone.dat");
    let codes_path = dir.path().join("area_codes.json");
    let config_path = dir.path().join("config.yml");

    let writer = DataFileWriter::from_source(SOURCE.as_bytes(), *b"2301").unwrap();
    fs::write(&data_path, writer.build().unwrap()).unwrap();
    fs::write(
        &codes_path,
        r#"[{"province":"上海","city":"上海","area_code":"021"}]"#,
    )
    .unwrap();
    fs::write(
        &config_path,
        format!(
            "phonedata: {}\narea_code: \"021\"\narea_codes: {}\n",
            data_path.display(),
            codes_path.display()
        ),
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    let data = DataFile::load(&config.phonedata).unwrap();
    let table = AreaCodeTable::load(config.area_codes.as_ref().unwrap()).unwrap();

    let pr = find(&data, "02187654321", &config.area_code, Some(&table)).unwrap();
    assert_eq!(pr.locality, Locality::Local);

    let pr = find(&data, "15300001234", &config.area_code, Some(&table)).unwrap();
    assert_eq!(pr.locality, Locality::Local);
}

#[test]
fn test_search_agrees_with_linear_scan() {
    let mut writer = DataFileWriter::new(*b"2301");
    for i in 0..2_000u32 {
        // Sparse, with runs of duplicate keys.
        let prefix = 1_300_000 + (i / 3) * 101;
        writer.add(SourceRow::new(prefix, format!("p{}", i), "c", "z", "a", 1));
    }
    let data = DataFile::from_bytes(writer.build().unwrap()).unwrap();

    for key in (1_299_000..1_370_000).step_by(7) {
        let linear = data.entries().find(|e| e.key == key);
        assert_eq!(data.search(key), linear, "key {}", key);
    }
}
