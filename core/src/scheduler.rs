use std::time::{Duration, Instant};

use log::{info, warn};

use crate::chip8::Chip8;
use crate::config::Config;
use crate::constants::MAX_FRAME_DELTA;
use crate::error::RunError;
use crate::instruction::Flow;
use crate::peripheral::{Control, DisplaySink, InputSource};

/// What happened during one scheduler iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub control: Control,
    /// Instructions fetched and executed.
    pub instructions: u64,
    /// Timer decrements applied; the screen was redrawn if this is nonzero.
    pub frames: u32,
    /// Faults reported by the CPU and skipped over.
    pub faults: u32,
}

/// # Scheduler
/// Runs the CPU and the 60Hz frame tick at independent rates from wall clock
/// deltas.
///
/// Each iteration:
/// - polls input, so the keypad is fresh before any instruction runs
/// - adds the elapsed time to the instruction and frame accumulators
/// - executes one instruction per whole instruction period accumulated
/// - decrements the timers once per whole frame period accumulated, then
///   hands the screen to the display if any frame elapsed
///
/// While the CPU waits on FX0A both accumulators are emptied instead of
/// building up a backlog: no instructions run, timers hold and nothing is
/// redrawn until a key is pressed.
pub struct Scheduler {
    instruction_period: Duration,
    frame_period: Duration,
    instruction_time: Duration,
    frame_time: Duration,
}

impl Scheduler {
    pub fn new(config: &Config) -> Self {
        Scheduler {
            instruction_period: config.instruction_period(),
            frame_period: config.frame_period(),
            instruction_time: Duration::ZERO,
            frame_time: Duration::ZERO,
        }
    }

    /// Runs a single iteration covering `elapsed` wall time.
    ///
    /// At most `MAX_FRAME_DELTA` of `elapsed` is accounted for. CPU faults
    /// are logged and skipped; only the peripherals can fail a tick.
    pub fn tick(
        &mut self,
        chip8: &mut Chip8,
        display: &mut dyn DisplaySink,
        input: &mut dyn InputSource,
        elapsed: Duration,
    ) -> Result<Tick, RunError> {
        let mut tick = Tick {
            control: input.poll(chip8.keypad_mut())?,
            instructions: 0,
            frames: 0,
            faults: 0,
        };
        if tick.control == Control::Quit {
            return Ok(tick);
        }

        let elapsed = elapsed.min(MAX_FRAME_DELTA);
        let executed = chip8.instructions_executed();
        self.instruction_time += elapsed;
        while self.instruction_time >= self.instruction_period {
            self.instruction_time -= self.instruction_period;
            match chip8.step() {
                Ok(Flow::Wait) => {
                    self.instruction_time = Duration::ZERO;
                    break;
                }
                Ok(_) => {}
                Err(fault) => {
                    warn!("{}", fault);
                    tick.faults += 1;
                }
            }
        }
        tick.instructions = chip8.instructions_executed() - executed;

        if chip8.is_waiting() {
            self.frame_time = Duration::ZERO;
            return Ok(tick);
        }

        self.frame_time += elapsed;
        while self.frame_time >= self.frame_period {
            self.frame_time -= self.frame_period;
            chip8.tick_timers();
            tick.frames += 1;
        }
        if tick.frames > 0 {
            display.render(chip8.frame())?;
        }

        Ok(tick)
    }

    /// Runs `chip8` against the wall clock until `input` asks to quit or a
    /// peripheral fails.
    pub fn run(
        &mut self,
        chip8: &mut Chip8,
        display: &mut dyn DisplaySink,
        input: &mut dyn InputSource,
    ) -> Result<(), RunError> {
        info!(
            "running at {:?} per instruction, {:?} per frame",
            self.instruction_period, self.frame_period
        );
        let mut last = Instant::now();
        loop {
            let now = Instant::now();
            let tick = self.tick(chip8, display, input, now - last)?;
            last = now;
            if tick.control == Control::Quit {
                info!(
                    "quit after {} instructions",
                    chip8.instructions_executed()
                );
                return Ok(());
            }
            std::thread::sleep(self.until_next_event());
        }
    }

    /// Time until either accumulator next fills a whole period.
    fn until_next_event(&self) -> Duration {
        let instruction = self.instruction_period.saturating_sub(self.instruction_time);
        let frame = self.frame_period.saturating_sub(self.frame_time);
        instruction.min(frame)
    }
}

#[cfg(test)]
mod test_scheduler {
    use super::*;
    use crate::keypad::Keypad;
    use crate::screen::FrameBuffer;

    /// Counts renders and remembers the last frame.
    struct DummyDisplay {
        renders: usize,
        last: Option<FrameBuffer>,
    }

    impl DummyDisplay {
        fn new() -> Self {
            DummyDisplay {
                renders: 0,
                last: None,
            }
        }
    }

    impl DisplaySink for DummyDisplay {
        fn render(&mut self, frame: &FrameBuffer) -> Result<(), RunError> {
            self.renders += 1;
            self.last = Some(*frame);
            Ok(())
        }
    }

    /// Replays a script of keypad states, one per poll, then holds the last.
    struct DummyInput {
        script: Vec<Option<[bool; 16]>>,
        polls: usize,
    }

    impl DummyInput {
        fn idle() -> Self {
            DummyInput {
                script: vec![Some([false; 16])],
                polls: 0,
            }
        }

        fn script(script: Vec<Option<[bool; 16]>>) -> Self {
            DummyInput { script, polls: 0 }
        }
    }

    impl InputSource for DummyInput {
        fn poll(&mut self, keypad: &mut Keypad) -> Result<Control, RunError> {
            let index = self.polls.min(self.script.len() - 1);
            self.polls += 1;
            match self.script[index] {
                Some(keys) => {
                    for (key, pressed) in keys.iter().enumerate() {
                        keypad.set(key as u8, *pressed);
                    }
                    Ok(Control::Continue)
                }
                None => Ok(Control::Quit),
            }
        }
    }

    struct FailingDisplay;

    impl DisplaySink for FailingDisplay {
        fn render(&mut self, _frame: &FrameBuffer) -> Result<(), RunError> {
            Err(RunError::Display("window closed".to_string()))
        }
    }

    fn keys(pressed: &[u8]) -> [bool; 16] {
        let mut keys = [false; 16];
        for key in pressed {
            keys[*key as usize] = true;
        }
        keys
    }

    // 1ms per instruction and 10ms per frame keep the arithmetic exact
    fn scheduler() -> Scheduler {
        Scheduler::new(&Config {
            instructions_per_second: 1000,
            frames_per_second: 100,
            seed: Some(1),
        })
    }

    fn machine(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_seed(Some(1));
        chip8.load_program(program).unwrap();
        chip8
    }

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_runs_instructions_and_frames_at_their_own_rates() {
        // JP 0x200
        let mut chip8 = machine(&[0x12, 0x00]);
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::idle();
        let mut scheduler = scheduler();

        let tick = scheduler
            .tick(&mut chip8, &mut display, &mut input, 25 * MS)
            .unwrap();
        assert_eq!(tick.instructions, 25);
        assert_eq!(tick.frames, 2);
        assert_eq!(display.renders, 1);

        // the leftover 5ms of frame time carries over
        let tick = scheduler
            .tick(&mut chip8, &mut display, &mut input, 5 * MS)
            .unwrap();
        assert_eq!(tick.instructions, 5);
        assert_eq!(tick.frames, 1);
        assert_eq!(display.renders, 2);
    }

    #[test]
    fn test_no_frame_no_render() {
        let mut chip8 = machine(&[0x12, 0x00]);
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::idle();
        let tick = scheduler()
            .tick(&mut chip8, &mut display, &mut input, 3 * MS)
            .unwrap();
        assert_eq!(tick.frames, 0);
        assert_eq!(display.renders, 0);
    }

    #[test]
    fn test_timers_decay_per_frame() {
        // LD V0, 5; LD DT, V0; JP 0x204
        let mut chip8 = machine(&[0x60, 0x05, 0xF0, 0x15, 0x12, 0x04]);
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::idle();
        let mut scheduler = scheduler();

        scheduler
            .tick(&mut chip8, &mut display, &mut input, 10 * MS)
            .unwrap();
        assert_eq!(chip8.state().delay_timer, 4);
        scheduler
            .tick(&mut chip8, &mut display, &mut input, 100 * MS)
            .unwrap();
        assert_eq!(chip8.state().delay_timer, 0);
    }

    #[test]
    fn test_input_polled_before_execution() {
        // LD V0, 5; SKP V0; JP 0x204; JP 0x206
        let mut chip8 = machine(&[0x60, 0x05, 0xE0, 0x9E, 0x12, 0x04, 0x12, 0x06]);
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::script(vec![Some(keys(&[0x5]))]);
        scheduler()
            .tick(&mut chip8, &mut display, &mut input, 5 * MS)
            .unwrap();
        assert_eq!(chip8.state().pc, 0x206);
    }

    #[test]
    fn test_quit_stops_before_execution() {
        let mut chip8 = machine(&[0x12, 0x00]);
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::script(vec![None]);
        let tick = scheduler()
            .tick(&mut chip8, &mut display, &mut input, 20 * MS)
            .unwrap();
        assert_eq!(tick.control, Control::Quit);
        assert_eq!(tick.instructions, 0);
        assert_eq!(display.renders, 0);
    }

    #[test]
    fn test_key_wait_holds_cpu_and_timers() {
        // LD V0, 9; LD DT, V0; LD V1, K; JP 0x206
        let mut chip8 = machine(&[0x60, 0x09, 0xF0, 0x15, 0xF1, 0x0A, 0x12, 0x06]);
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::script(vec![
            Some(keys(&[])),
            Some(keys(&[])),
            Some(keys(&[0xB, 0x4])),
        ]);
        let mut scheduler = scheduler();

        // enters the wait before the first frame completes
        let tick = scheduler
            .tick(&mut chip8, &mut display, &mut input, 5 * MS)
            .unwrap();
        assert_eq!(tick.instructions, 3);
        assert_eq!(tick.frames, 0);
        assert!(chip8.is_waiting());
        assert_eq!(chip8.state().pc, 0x206);
        assert_eq!(chip8.state().delay_timer, 9);

        let tick = scheduler
            .tick(&mut chip8, &mut display, &mut input, 50 * MS)
            .unwrap();
        assert_eq!(tick.instructions, 0);
        assert_eq!(tick.frames, 0);
        assert_eq!(display.renders, 0);
        assert_eq!(chip8.state().pc, 0x206);
        assert_eq!(chip8.state().delay_timer, 9);

        let tick = scheduler
            .tick(&mut chip8, &mut display, &mut input, 10 * MS)
            .unwrap();
        assert!(!chip8.is_waiting());
        assert_eq!(chip8.state().v[0x1], 0x4);
        assert_eq!(chip8.state().pc, 0x206);
        // one slot resumed the CPU, the rest ran the jump
        assert_eq!(tick.instructions, 9);
        // the frame clock restarted when the wait ended
        assert_eq!(tick.frames, 1);
        assert_eq!(chip8.state().delay_timer, 8);
    }

    #[test]
    fn test_faults_do_not_stop_the_loop() {
        // two unknown opcodes then JP 0x204
        let mut chip8 = machine(&[0xFF, 0xFF, 0xFF, 0xFF, 0x12, 0x04]);
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::idle();
        let tick = scheduler()
            .tick(&mut chip8, &mut display, &mut input, 10 * MS)
            .unwrap();
        assert_eq!(tick.faults, 2);
        assert_eq!(tick.instructions, 10);
        assert_eq!(tick.control, Control::Continue);
        assert_eq!(chip8.state().pc, 0x204);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut chip8 = machine(&[0x12, 0x00]);
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::idle();
        let tick = scheduler()
            .tick(&mut chip8, &mut display, &mut input, Duration::from_secs(10))
            .unwrap();
        assert_eq!(tick.instructions, 250);
        assert_eq!(tick.frames, 25);
    }

    #[test]
    fn test_extreme_rate_still_returns() {
        let mut chip8 = machine(&[0x12, 0x00]);
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::idle();
        let mut scheduler = Scheduler::new(&Config {
            instructions_per_second: 2_000_000_000,
            frames_per_second: 100,
            seed: Some(1),
        });
        let tick = scheduler
            .tick(&mut chip8, &mut display, &mut input, Duration::from_micros(1))
            .unwrap();
        assert_eq!(tick.instructions, 1000);
    }

    #[test]
    fn test_renders_current_screen() {
        // LD I, 0x050; DRW V0, V0, 5; JP 0x204
        let mut chip8 = machine(&[0xA0, 0x50, 0xD0, 0x05, 0x12, 0x04]);
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::idle();
        scheduler()
            .tick(&mut chip8, &mut display, &mut input, 10 * MS)
            .unwrap();
        assert_eq!(display.last.as_ref(), Some(chip8.frame()));
        assert_eq!(display.last.unwrap()[0][0..4], [1, 1, 1, 1]);
    }

    #[test]
    fn test_display_failure_ends_tick() {
        let mut chip8 = machine(&[0x12, 0x00]);
        let mut input = DummyInput::idle();
        let result = scheduler().tick(&mut chip8, &mut FailingDisplay, &mut input, 10 * MS);
        assert!(matches!(result, Err(RunError::Display(_))));
    }

    #[test]
    fn test_until_next_event() {
        let mut chip8 = machine(&[0x12, 0x00]);
        let mut display = DummyDisplay::new();
        let mut input = DummyInput::idle();
        let mut scheduler = scheduler();
        assert_eq!(scheduler.until_next_event(), MS);
        scheduler
            .tick(
                &mut chip8,
                &mut display,
                &mut input,
                Duration::from_micros(9_500),
            )
            .unwrap();
        assert_eq!(scheduler.until_next_event(), Duration::from_micros(500));
    }
}
