//! 價格結果的顯示格式：印度盧比金額、狀態標籤、材料名稱。

/// 以 en-IN 慣例格式化盧比金額，例如 `₹12,34,567.00`
pub fn format_inr(value: f64) -> String {
    if value.is_nan() {
        return "₹NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-₹∞" } else { "₹∞" }.to_string();
    }

    let (integer, fraction) = round_to_paise(value.abs());
    let sign = if value < 0.0 { "-" } else { "" };

    format!("{}₹{}.{}", sign, group_indian(&integer), fraction)
}

// 以最短十進位表示法做四捨五入到小數兩位，避免二進位誤差 (1.005 → 1.01)
fn round_to_paise(value: f64) -> (String, String) {
    let repr = value.to_string();
    let (integer, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    if fraction.as_bytes().get(2).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - 2;
    let to_string = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    (to_string(&digits[..split]), to_string(&digits[split..]))
}

// 最後三位一組，之前每兩位一組
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = vec![tail];
    while head.len() > 2 {
        let (rest, group) = head.split_at(head.len() - 2);
        groups.push(group);
        head = rest;
    }
    groups.push(head);
    groups.reverse();
    groups.join(",")
}

/// 後端狀態代碼轉成顯示文字；不認得的代碼原樣回傳
pub fn condition_label(condition: &str) -> String {
    match condition {
        "working" => "Working (100%)".to_string(),
        "partially_working" => "Partially Working (60%)".to_string(),
        "not_working" => "Not Working (30%)".to_string(),
        other => other.to_string(),
    }
}

/// `rare_earth_metals` → `Rare Earth Metals`
pub fn material_label(material: &str) -> String {
    material
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
