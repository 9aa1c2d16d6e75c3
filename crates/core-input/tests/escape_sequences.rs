use core_events::KeyEvent;
use core_input::InputDecoder;
use core_terminal::ScriptedDriver;
use proptest::prelude::*;
use std::time::Duration;

fn decoder() -> InputDecoder {
    InputDecoder::new(Duration::from_millis(100))
}

fn decode_all(input: &[u8], count: usize) -> Vec<KeyEvent> {
    let mut driver = ScriptedDriver::new().with_input(input);
    (0..count)
        .map(|_| decoder().read_key(&mut driver).unwrap())
        .collect()
}

#[test]
fn arrow_sequences() {
    assert_eq!(
        decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D", 4),
        vec![
            KeyEvent::ArrowUp,
            KeyEvent::ArrowDown,
            KeyEvent::ArrowRight,
            KeyEvent::ArrowLeft,
        ]
    );
}

#[test]
fn unknown_final_byte_is_raw_escape() {
    assert_eq!(decode_all(b"\x1b[Z", 1), vec![KeyEvent::RawEscape]);
}

#[test]
fn lone_escape_times_out_to_raw_escape() {
    let mut driver = ScriptedDriver::new().with_input(b"\x1b").with_timeout();
    assert_eq!(decoder().read_key(&mut driver).unwrap(), KeyEvent::RawEscape);
}

#[test]
fn keys_after_a_sequence_decode_normally() {
    assert_eq!(
        decode_all(b"\x1b[Ca\x11", 3),
        vec![
            KeyEvent::ArrowRight,
            KeyEvent::Printable(b'a'),
            KeyEvent::ControlQuit
        ]
    );
}

proptest! {
    #[test]
    fn ctrl_q_always_quits(timeouts in 0usize..4) {
        let mut driver = ScriptedDriver::new();
        for _ in 0..timeouts {
            driver.push_timeout();
        }
        driver.push_input(&[0x11]);
        prop_assert_eq!(decoder().read_key(&mut driver).unwrap(), KeyEvent::ControlQuit);
    }

    #[test]
    fn csi_finals_outside_abcd_never_error(final_byte in any::<u8>()) {
        let mut driver = ScriptedDriver::new().with_input(&[0x1b, b'[', final_byte]);
        let key = decoder().read_key(&mut driver).unwrap();
        if !(b'A'..=b'D').contains(&final_byte) {
            prop_assert_eq!(key, KeyEvent::RawEscape);
        }
    }
}
