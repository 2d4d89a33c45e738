//! Control transfer: unconditional and conditional `JMP`/`CALL`/`RET`,
//! `RST n`, and `PCHL`. None of these touch the flags (they read them).

use super::I8080;

impl I8080 {
    /// Evaluate one of the eight condition codes encoded in bits 3-5 of a
    /// conditional branch opcode: NZ, Z, NC, C, PO, PE, P, M.
    fn condition(&self, opcode: u8) -> bool {
        match (opcode >> 3) & 0x07 {
            0 => !self.flags.z,
            1 => self.flags.z,
            2 => !self.flags.cy,
            3 => self.flags.cy,
            4 => !self.flags.p,
            5 => self.flags.p,
            6 => !self.flags.s,
            7 => self.flags.s,
            _ => unreachable!(),
        }
    }

    pub(crate) fn push_u16(&mut self, value: u16) {
        self.sp = self.sp.wrapping_sub(1);
        self.write_mem(self.sp, (value >> 8) as u8);
        self.sp = self.sp.wrapping_sub(1);
        self.write_mem(self.sp, value as u8);
    }

    pub(crate) fn pop_u16(&mut self) -> u16 {
        let lo = self.read_mem(self.sp);
        self.sp = self.sp.wrapping_add(1);
        let hi = self.read_mem(self.sp);
        self.sp = self.sp.wrapping_add(1);
        u16::from_le_bytes([lo, hi])
    }

    /// `JMP addr`: unconditional jump.
    pub(crate) fn op_jmp(&mut self) {
        let addr = self.fetch_u16();
        self.pc = addr;
    }

    /// `Jcc addr`: the address is always fetched (advancing `pc` past the
    /// instruction) even when the jump is not taken.
    pub(crate) fn op_jmp_cond(&mut self, opcode: u8) {
        let addr = self.fetch_u16();
        if self.condition(opcode) {
            self.pc = addr;
        }
    }

    /// `CALL addr`: push the return address, then jump.
    pub(crate) fn op_call(&mut self) {
        let addr = self.fetch_u16();
        self.push_u16(self.pc);
        self.pc = addr;
    }

    /// `Ccc addr`: same fetch-always rule as `Jcc`.
    pub(crate) fn op_call_cond(&mut self, opcode: u8) {
        let addr = self.fetch_u16();
        if self.condition(opcode) {
            self.push_u16(self.pc);
            self.pc = addr;
        }
    }

    /// `RET`: pop the return address into `pc`.
    pub(crate) fn op_ret(&mut self) {
        self.pc = self.pop_u16();
    }

    /// `Rcc`: conditional return.
    pub(crate) fn op_ret_cond(&mut self, opcode: u8) {
        if self.condition(opcode) {
            self.pc = self.pop_u16();
        }
    }

    /// `RST n`: call to the fixed address `n * 8`. Used by the machine
    /// shell itself to inject the vblank/mid-screen interrupts, via
    /// [`I8080::call`] rather than this opcode handler.
    pub(crate) fn op_rst(&mut self, opcode: u8) {
        let n = (opcode >> 3) & 0x07;
        self.push_u16(self.pc);
        self.pc = (n as u16) * 8;
    }

    /// `PCHL`: jump to the address in `HL`.
    pub(crate) fn op_pchl(&mut self) {
        self.pc = self.hl();
    }
}

#[cfg(test)]
mod tests {
    use super::super::I8080;

    fn cpu_with(program: &[u8]) -> I8080 {
        let mut cpu = I8080::new();
        cpu.load(program, 0x2000).unwrap();
        cpu.pc = 0x2000;
        cpu.sp = 0x2400;
        cpu
    }

    #[test]
    fn jmp_sets_pc_directly() {
        let mut cpu = cpu_with(&[0xC3, 0x00, 0x30]); // JMP 0x3000
        cpu.step().unwrap();
        assert_eq!(cpu.pc, 0x3000);
    }

    #[test]
    fn conditional_jump_not_taken_still_advances_past_operand() {
        let mut cpu = cpu_with(&[0xCA, 0x00, 0x30]); // JZ 0x3000
        cpu.flags.z = false;
        cpu.step().unwrap();
        assert_eq!(cpu.pc, 0x2003);
    }

    #[test]
    fn call_and_ret_round_trip_through_the_stack() {
        let mut cpu = cpu_with(&[0xCD, 0x00, 0x30]); // CALL 0x3000
        cpu.load(&[0xC9], 0x3000).unwrap(); // RET
        cpu.step().unwrap();
        assert_eq!(cpu.pc, 0x3000);
        assert_eq!(cpu.sp, 0x23FE);
        cpu.step().unwrap();
        assert_eq!(cpu.pc, 0x2003);
        assert_eq!(cpu.sp, 0x2400);
    }

    #[test]
    fn call_pushes_high_byte_first() {
        let mut cpu = cpu_with(&[0xCD, 0x00, 0x30]); // CALL 0x3000, return pc = 0x2003
        cpu.step().unwrap();
        assert_eq!(cpu.read_mem(0x23FF), 0x20, "high byte at higher address");
        assert_eq!(cpu.read_mem(0x23FE), 0x03, "low byte at lower address");
    }

    #[test]
    fn rst_1_calls_address_8() {
        let mut cpu = cpu_with(&[0x00]);
        cpu.op_rst(0xCF); // RST 1
        assert_eq!(cpu.pc, 8);
    }

    #[test]
    fn pchl_jumps_to_hl() {
        let mut cpu = cpu_with(&[0xE9]); // PCHL
        cpu.set_hl(0x4444);
        cpu.step().unwrap();
        assert_eq!(cpu.pc, 0x4444);
    }

    #[test]
    fn cpu_call_helper_matches_interrupt_injection_contract() {
        let mut cpu = cpu_with(&[0x00]);
        let pc_before = cpu.pc;
        cpu.call(0x08, 0);
        assert_eq!(cpu.pc, 0x08);
        assert_eq!(cpu.pop_u16(), pc_before);
    }
}
