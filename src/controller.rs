use bitflags::bitflags;

bitflags! {
    // https://www.nesdev.org/wiki/Standard_controller
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonSnapshot: u8 {
        const A        = 0b0000_0001;
        const B        = 0b0000_0010;
        const SELECT   = 0b0000_0100;
        const START    = 0b0000_1000;
        const UP       = 0b0001_0000;
        const DOWN     = 0b0010_0000;
        const LEFT     = 0b0100_0000;
        const RIGHT    = 0b1000_0000;
    }
}

/// A single standard NES pad: a strobe latch and an 8-bit shift register
/// that serializes the button state out one bit per read of $4016/$4017.
#[derive(Debug, Clone, Copy, Default)]
pub struct Controller {
    strobe: bool,
    shift: u8,
    buttons: ButtonSnapshot,
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            strobe: false,
            shift: ButtonSnapshot::A.bits(),
            buttons: ButtonSnapshot::empty(),
        }
    }

    /// Write to $4016: while bit 0 is high the snapshot is latched
    /// continuously; the high-to-low transition freezes it for read-out.
    pub fn write_strobe(&mut self, data: u8, buttons: ButtonSnapshot) {
        self.strobe = data & 1 != 0;
        self.buttons = buttons;
        self.shift = ButtonSnapshot::A.bits();
    }

    /// Serial read: bit 0 of the shift register, then shift right. Once the
    /// 8 buttons have been read, further reads return 1 (open-bus convention).
    pub fn read_bit(&mut self) -> u8 {
        if self.shift == 0 {
            return 1;
        }
        let cur = ButtonSnapshot::from_bits_truncate(self.shift);
        let value = u8::from(self.buttons.contains(cur));
        if !self.strobe {
            self.shift <<= 1;
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read8(c: &mut Controller) -> Vec<u8> {
        (0..8).map(|_| c.read_bit()).collect()
    }

    #[test]
    fn test_all_pressed_serial_order() {
        let mut c = Controller::new();
        c.write_strobe(1, ButtonSnapshot::all());
        c.write_strobe(0, ButtonSnapshot::all());
        assert_eq!(read8(&mut c), vec![1, 1, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_only_a_pressed() {
        let mut c = Controller::new();
        c.write_strobe(1, ButtonSnapshot::A);
        c.write_strobe(0, ButtonSnapshot::A);
        assert_eq!(read8(&mut c), vec![1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_reads_past_eight_return_one() {
        let mut c = Controller::new();
        c.write_strobe(1, ButtonSnapshot::empty());
        c.write_strobe(0, ButtonSnapshot::empty());
        for _ in 0..8 {
            c.read_bit();
        }
        for _ in 0..10 {
            assert_eq!(c.read_bit(), 1);
        }
    }

    #[test]
    fn test_continuous_strobe_keeps_reading_bit_a() {
        let mut c = Controller::new();
        c.write_strobe(1, ButtonSnapshot::A);
        for _ in 0..10 {
            assert_eq!(c.read_bit(), 1);
        }
    }
}
