use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use subcli::{global, Error, HelpTopic, Input, Outcome, Program, SubCommand};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// The default command line is process-wide, so every step lives in one test.
#[test]
fn test_default_command_line_lifecycle() {
    assert!(matches!(global::args(), Err(Error::NotInitialized)));
    assert!(matches!(
        global::add_cmd(SubCommand::new("early")),
        Err(Error::NotInitialized)
    ));

    global::init(Program::new("facade", "3.1", "Facade test")).unwrap();
    assert!(matches!(
        global::init(Program::default()),
        Err(Error::AlreadyInitialized)
    ));

    let out = Capture::default();
    global::with(|cli| cli.set_output(out.clone())).unwrap();
    global::add_cmd(SubCommand::new("echo").handler(|_input: &Input<'_>| Ok(()))).unwrap();
    global::add_help(HelpTopic::new("env", "environment", "env help")).unwrap();

    let outcome = global::dispatch(&["facade", "echo", "a", "b"]).unwrap();
    assert_eq!(
        outcome,
        Outcome::Ran {
            command: "echo".into()
        }
    );
    assert_eq!(global::args().unwrap(), ["a", "b"]);

    global::set_program(Program::new("facade", "3.2", "Facade test")).unwrap();
    global::dispatch(&["facade", "version"]).unwrap();
    let text = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
    assert_eq!(text, "facade version 3.2\n");
}
