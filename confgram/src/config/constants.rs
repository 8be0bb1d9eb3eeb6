pub mod compile_time {
    pub mod driver {
        /// Maximum number of diagnostics stored in a single parse report
        /// RESOURCE: Diagnostics past this point are counted, not stored
        pub const MAX_RECORDED_DIAGNOSTICS: usize = 10_000;

        /// Maximum raw line text echoed into a log event
        /// RESOURCE: Keeps one pathological line from flooding the log
        pub const MAX_LOGGED_LINE_LENGTH: usize = 512;
    }

    pub mod lexical {
        /// Type name reported for text matching neither a keyword nor a detector
        pub const UNKNOWN_TOKEN_TYPE: &str = "";
    }

    pub mod logging {
        /// Log buffer size for in-memory loggers
        /// RESOURCE: Controls memory usage for logging
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;
    }
}
