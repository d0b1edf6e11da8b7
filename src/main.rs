// clic_vectored/src/main.rs

//! Board demo for the SiFive E21 on the Arty A7.
//!
//! Brings the CLIC up in vectored mode, wires the machine software
//! interrupt, the timer, the CLIC software interrupt and the first local
//! external line (a button), then idles. Handlers report over UART0.

#![cfg_attr(all(target_arch = "riscv32", target_os = "none"), no_std, no_main)]

#[cfg(all(target_arch = "riscv32", target_os = "none"))]
mod board {
    use clic_vectored::platform::{Platform, ARTY_E21};
    use clic_vectored::selftest;
    use clic_vectored::trap::infrastructure::line_config::InterruptLines;
    use clic_vectored::trap::infrastructure::low_level::halt;
    use clic_vectored::trap::infrastructure::timer::Timer;
    use clic_vectored::trap::{
        self, local_interrupt, ClicError, ClicLayout, ControllerConfig, HardwareController,
        HartContext, Interrupt, LevelEncoding, LineSetup, MachineHart, Setup,
    };
    use clic_vectored::{console, error_print, info_print, warn_print};
    use core::arch::global_asm;
    use core::panic::PanicInfo;
    use core::ptr::{read_volatile, write_volatile};
    use core::sync::atomic::{AtomicUsize, Ordering};

    const PLATFORM: Platform = ARTY_E21;
    const LAYOUT: ClicLayout = ClicLayout::new(PLATFORM, HartContext::new(0));

    /// Timer period.
    const TICK_MS: u32 = 5000;

    /// Two level bits: the timer preempts the button, the button preempts
    /// the software interrupts.
    const CONFIG: ControllerConfig = ControllerConfig::new(false, 2, 0);
    const LEVELS: LevelEncoding = CONFIG.encoding();

    const BUTTON: u16 = local_interrupt(0);

    // Saves the caller-saved registers around a call into Rust and returns
    // with `mret`. Entries are not preemptible: MIE stays clear inside.
    macro_rules! interrupt_entry {
        ($entry:ident => $handler:path) => {
            extern "C" {
                fn $entry();
            }

            global_asm!(
                concat!(".section .text.", stringify!($entry), ", \"ax\""),
                ".balign 4",
                concat!(".global ", stringify!($entry)),
                concat!(stringify!($entry), ":"),
                "    addi sp, sp, -64",
                "    sw ra, 0(sp)",
                "    sw t0, 4(sp)",
                "    sw t1, 8(sp)",
                "    sw t2, 12(sp)",
                "    sw a0, 16(sp)",
                "    sw a1, 20(sp)",
                "    sw a2, 24(sp)",
                "    sw a3, 28(sp)",
                "    sw a4, 32(sp)",
                "    sw a5, 36(sp)",
                "    sw a6, 40(sp)",
                "    sw a7, 44(sp)",
                "    sw t3, 48(sp)",
                "    sw t4, 52(sp)",
                "    sw t5, 56(sp)",
                "    sw t6, 60(sp)",
                "    call {handler}",
                "    lw ra, 0(sp)",
                "    lw t0, 4(sp)",
                "    lw t1, 8(sp)",
                "    lw t2, 12(sp)",
                "    lw a0, 16(sp)",
                "    lw a1, 20(sp)",
                "    lw a2, 24(sp)",
                "    lw a3, 28(sp)",
                "    lw a4, 32(sp)",
                "    lw a5, 36(sp)",
                "    lw a6, 40(sp)",
                "    lw a7, 44(sp)",
                "    lw t3, 48(sp)",
                "    lw t4, 52(sp)",
                "    lw t5, 56(sp)",
                "    lw t6, 60(sp)",
                "    addi sp, sp, 64",
                "    mret",
                handler = sym $handler,
            );
        };
    }

    interrupt_entry!(software_entry => on_software);
    interrupt_entry!(timer_entry => on_timer);
    interrupt_entry!(clic_software_entry => on_clic_software);
    interrupt_entry!(button_entry => on_button);

    static LINES: [LineSetup; 4] = [
        LineSetup::new(Interrupt::MachineSoft.id())
            .handler(software_entry)
            .control(LEVELS.encode(1, 0))
            .enabled(),
        LineSetup::new(Interrupt::MachineTimer.id())
            .handler(timer_entry)
            .control(LEVELS.encode(3, 0))
            .enabled(),
        LineSetup::new(Interrupt::ClicSoft.id())
            .handler(clic_software_entry)
            .control(LEVELS.encode(1, 1))
            .enabled(),
        LineSetup::new(BUTTON)
            .handler(button_entry)
            .control(LEVELS.encode(2, 0))
            .enabled(),
    ];

    static TICKS: AtomicUsize = AtomicUsize::new(0);
    static PRESSES: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn on_software() {
        Timer::new(&LAYOUT, &MachineHart).clear_software();
        info_print!("Machine software interrupt");
        let lines = InterruptLines::new(&LAYOUT, &MachineHart);
        if let Err(err) = lines.set_pending(Interrupt::ClicSoft.id()) {
            error_print!("Could not raise the CLIC software interrupt: {}", err);
        }
    }

    extern "C" fn on_clic_software() {
        let lines = InterruptLines::new(&LAYOUT, &MachineHart);
        if let Err(err) = lines.clear_pending(Interrupt::ClicSoft.id()) {
            error_print!("Could not clear the CLIC software interrupt: {}", err);
        }
        info_print!("CLIC software interrupt");
    }

    extern "C" fn on_timer() {
        let deadline = Timer::new(&LAYOUT, &MachineHart).arm_ms(TICK_MS);
        let ticks = TICKS.fetch_add(1, Ordering::Relaxed) + 1;
        info_print!("Timer tick {} (next at {})", ticks, deadline);
    }

    extern "C" fn on_button() {
        let presses = PRESSES.fetch_add(1, Ordering::Relaxed) + 1;
        info_print!("Button pressed ({} total)", presses);
    }

    // SiFive UART0: txdata at +0x00 (bit 31 = full), txctrl at +0x08.
    const UART_TXDATA: usize = PLATFORM.uart0_base;
    const UART_TXCTRL: usize = PLATFORM.uart0_base + 0x08;
    const UART_TXEN: u32 = 1;

    fn uart_init() {
        unsafe { write_volatile(UART_TXCTRL as *mut u32, UART_TXEN) };
    }

    fn uart_write(s: &str) {
        for byte in s.bytes() {
            unsafe {
                while read_volatile(UART_TXDATA as *const u32) & (1 << 31) != 0 {}
                write_volatile(UART_TXDATA as *mut u32, byte as u32);
            }
        }
    }

    global_asm!(
        ".section .text.entry, \"ax\"",
        ".global _start",
        "_start:",
        "    .option push",
        "    .option norelax",
        "    la gp, __global_pointer$",
        "    .option pop",
        "    la sp, _stack_top",
        "    call {main}",
        main = sym rust_main,
    );

    /// Copies `.data` from its load address and zeroes `.bss`.
    unsafe fn init_memory() {
        extern "C" {
            static mut _sdata: u32;
            static mut _edata: u32;
            static _sidata: u32;
            static mut _sbss: u32;
            static mut _ebss: u32;
        }

        let mut src = core::ptr::addr_of!(_sidata);
        let mut dst = core::ptr::addr_of_mut!(_sdata);
        while dst < core::ptr::addr_of_mut!(_edata) {
            write_volatile(dst, read_volatile(src));
            dst = dst.add(1);
            src = src.add(1);
        }

        let mut bss = core::ptr::addr_of_mut!(_sbss);
        while bss < core::ptr::addr_of_mut!(_ebss) {
            write_volatile(bss, 0);
            bss = bss.add(1);
        }
    }

    extern "C" fn rust_main() -> ! {
        unsafe { init_memory() };
        uart_init();
        console::set_sink(uart_write);
        info_print!("CLIC vectored demo on hart {}", MachineHart.hart_id());

        if !selftest::run_all_tests() {
            warn_print!("Self-test reported failures; continuing.");
        }

        if let Err(err) = bring_up() {
            error_print!("Interrupt setup failed: {}", err);
            halt();
        }
        clic_vectored::main_loop()
    }

    fn bring_up() -> Result<(), ClicError> {
        trap::init(PLATFORM)?;
        trap::apply(&Setup::new(CONFIG, &LINES).with_timer_ms(TICK_MS))?;
        trap::enable_all()?;
        info_print!("Interrupts enabled; raising a software interrupt.");
        trap::raise_software()
    }

    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        MachineHart.disable_interrupts();
        error_print!("PANIC: {}", info);
        halt()
    }
}

#[cfg(not(all(target_arch = "riscv32", target_os = "none")))]
fn main() {
    eprintln!("clic-demo only runs on riscv32 bare metal (e.g. riscv32imac-unknown-none-elf)");
}
