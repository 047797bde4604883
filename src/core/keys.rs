//! 配置文件里的按键名 → KeyCode
//!
//! 同时接受 Bevy 的写法（`Numpad9`）和 ModAPI 旧配置里的写法（`Keypad9`、`KeypadMinus`）。

use bevy::prelude::*;

const LETTERS: [KeyCode; 26] = [
    KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
    KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
    KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
    KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
    KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
    KeyCode::KeyZ,
];

const DIGITS: [KeyCode; 10] = [
    KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
    KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
];

const NUMPAD: [KeyCode; 10] = [
    KeyCode::Numpad0, KeyCode::Numpad1, KeyCode::Numpad2, KeyCode::Numpad3, KeyCode::Numpad4,
    KeyCode::Numpad5, KeyCode::Numpad6, KeyCode::Numpad7, KeyCode::Numpad8, KeyCode::Numpad9,
];

const FUNCTION: [KeyCode; 12] = [
    KeyCode::F1, KeyCode::F2, KeyCode::F3, KeyCode::F4, KeyCode::F5, KeyCode::F6,
    KeyCode::F7, KeyCode::F8, KeyCode::F9, KeyCode::F10, KeyCode::F11, KeyCode::F12,
];

/// 解析按键名，大小写不敏感；认不出返回 None
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    let lower = name.trim().to_ascii_lowercase();

    // 单个字母 / 数字
    if lower.len() == 1 {
        let c = lower.as_bytes()[0];
        return match c {
            b'a'..=b'z' => Some(LETTERS[(c - b'a') as usize]),
            b'0'..=b'9' => Some(DIGITS[(c - b'0') as usize]),
            _ => None,
        };
    }

    if let Some(rest) = lower
        .strip_prefix("numpad")
        .or_else(|| lower.strip_prefix("keypad"))
    {
        return match rest {
            "minus" | "subtract" => Some(KeyCode::NumpadSubtract),
            "plus" | "add" => Some(KeyCode::NumpadAdd),
            "multiply" => Some(KeyCode::NumpadMultiply),
            "divide" => Some(KeyCode::NumpadDivide),
            "enter" => Some(KeyCode::NumpadEnter),
            "period" | "decimal" => Some(KeyCode::NumpadDecimal),
            _ => single_digit(rest).map(|d| NUMPAD[d]),
        };
    }

    if let Some(rest) = lower
        .strip_prefix("digit")
        .or_else(|| lower.strip_prefix("alpha"))
    {
        return single_digit(rest).map(|d| DIGITS[d]);
    }

    if let Some(rest) = lower.strip_prefix("key") {
        if rest.len() == 1 {
            return parse_key_code(rest).filter(|k| LETTERS.contains(k));
        }
    }

    if let Some(rest) = lower.strip_prefix('f') {
        if let Ok(n) = rest.parse::<usize>() {
            return (1..=12).contains(&n).then(|| FUNCTION[n - 1]);
        }
    }

    match lower.as_str() {
        "escape" | "esc" => Some(KeyCode::Escape),
        "tab" => Some(KeyCode::Tab),
        "space" => Some(KeyCode::Space),
        "enter" | "return" => Some(KeyCode::Enter),
        "backspace" => Some(KeyCode::Backspace),
        "insert" => Some(KeyCode::Insert),
        "delete" => Some(KeyCode::Delete),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),
        "minus" => Some(KeyCode::Minus),
        "equal" | "equals" => Some(KeyCode::Equal),
        "backquote" => Some(KeyCode::Backquote),
        _ => None,
    }
}

fn single_digit(s: &str) -> Option<usize> {
    match s.as_bytes() {
        [c @ b'0'..=b'9'] => Some((c - b'0') as usize),
        _ => None,
    }
}
