/// Layout of one bank's statement export: how many rows sit above the
/// header row, and which header each normalized field comes from.
#[derive(Debug)]
pub struct BankFormat {
    pub id: &'static str,
    pub label: &'static str,
    pub skip_rows: usize,
    pub date_header: &'static str,
    pub note_header: &'static str,
    pub amount_header: &'static str,
    pub title_header: &'static str,
}

pub static BANKS: &[BankFormat] = &[
    BankFormat {
        id: "kakaobank",
        label: "카카오뱅크",
        skip_rows: 10,
        date_header: "거래일시",
        note_header: "내용",
        amount_header: "거래금액",
        title_header: "거래구분",
    },
    BankFormat {
        id: "tossbank",
        label: "토스뱅크",
        skip_rows: 8,
        date_header: "거래 일시",
        note_header: "적요",
        amount_header: "거래 금액",
        title_header: "거래 유형",
    },
];

pub fn lookup(id: &str) -> Option<&'static BankFormat> {
    return BANKS.iter().find(|bank| bank.id == id);
}

#[cfg(test)]
mod test {
    use super::lookup;

    #[test]
    fn known_banks_resolve() {
        assert_eq!(lookup("kakaobank").unwrap().skip_rows, 10);
        assert_eq!(lookup("tossbank").unwrap().skip_rows, 8);
    }

    #[test]
    fn unknown_bank_is_none() {
        assert!(lookup("shinhan").is_none());
        assert!(lookup("").is_none());
    }
}
