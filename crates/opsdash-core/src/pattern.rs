//! 와일드카드 메트릭 패턴 매칭.
//!
//! 메트릭 경로는 점(`.`)으로 구분된 세그먼트 열이고, 패턴의 `*`는
//! 정확히 한 세그먼트에 매칭된다. 백엔드가 확장해서 돌려준 실제 경로를
//! 원래 패턴과 대조해 시리즈 라벨을 만드는 데 쓰인다.

/// 패턴과 경로를 세그먼트 단위로 대조한다.
///
/// 세그먼트 수가 다르거나 리터럴 세그먼트가 불일치하면 `None`,
/// 매칭되면 `*` 자리에 대응한 세그먼트들을 순서대로 반환한다.
pub fn match_captures(pattern: &str, path: &str) -> Option<Vec<String>> {
    let pattern_segs: Vec<&str> = pattern.split('.').collect();
    let path_segs: Vec<&str> = path.split('.').collect();

    if pattern_segs.len() != path_segs.len() {
        return None;
    }

    let mut captures = Vec::new();
    for (p, s) in pattern_segs.iter().zip(path_segs.iter()) {
        if *p == "*" {
            captures.push((*s).to_string());
        } else if p != s {
            return None;
        }
    }

    Some(captures)
}

/// 위젯의 패턴 목록에서 경로에 대응하는 패턴을 고른다.
///
/// 패턴이 하나뿐이면 매칭 여부와 무관하게 그 패턴을 쓴다.
/// 여러 개면 뒤에서부터 검사해 처음 매칭되는 패턴을 반환한다.
pub fn select_pattern<'a>(patterns: &'a [String], path: &str) -> Option<&'a str> {
    if patterns.is_empty() {
        return None;
    }
    if patterns.len() == 1 {
        return Some(&patterns[0]);
    }

    patterns
        .iter()
        .rev()
        .find(|p| match_captures(p, path).is_some())
        .map(|p| p.as_str())
}

/// 라벨 템플릿의 `{n}` 자리에 캡처 값을 대입한다.
///
/// 캡처 범위를 벗어난 인덱스는 빈 문자열로 치환하고,
/// 닫히지 않았거나 숫자가 아닌 중괄호는 그대로 남긴다.
pub fn render_label(template: &str, captures: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch != '{' {
            out.push(ch);
            continue;
        }

        // '{' 다음의 숫자 열과 '}'를 찾는다
        let mut end = None;
        let mut digits = true;
        for (i, c) in template[start + 1..].char_indices() {
            if c == '}' {
                end = Some(start + 1 + i);
                break;
            }
            if !c.is_ascii_digit() {
                digits = false;
                break;
            }
        }

        match end {
            Some(end) if digits && end > start + 1 => {
                let index: usize = match template[start + 1..end].parse() {
                    Ok(n) => n,
                    Err(_) => {
                        out.push(ch);
                        continue;
                    }
                };
                if let Some(capture) = captures.get(index) {
                    out.push_str(capture);
                }
                // 소비한 부분까지 커서를 전진
                while let Some(&(i, _)) = chars.peek() {
                    if i > end {
                        break;
                    }
                    chars.next();
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

/// 백엔드 함수 호출 표기를 벗겨 내부 메트릭 경로만 남긴다.
///
/// `summarize(a.b.c,'1h','sum')` → `a.b.c`.
/// 여는 괄호가 없으면 입력을 그대로 반환한다.
pub fn strip_functions(path: &str) -> &str {
    let Some(open) = path.rfind('(') else {
        return path;
    };
    let inner = &path[open + 1..];
    match inner.find(',') {
        Some(comma) => &inner[..comma],
        None => inner.trim_end_matches(')'),
    }
}
