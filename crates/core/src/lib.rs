pub mod analysis {
    pub mod domain {
        pub mod semantic_analyzer;
        pub mod semantic_result;
    }
    pub mod infrastructure;
}

pub mod lexicon {
    pub mod domain {
        pub mod indicator;
        pub mod lexical_scorer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod analysis_executor;
    pub mod analyze_transcript_use_case;
    pub mod report_logger;
    pub mod infrastructure {
        pub mod sequential_analysis_executor;
        pub mod threaded_analysis_executor;
    }
}

pub mod report {
    pub mod domain {
        pub mod magnitude;
        pub mod report;
    }
}

pub mod shared {
    pub mod constants;
    pub mod math;
}

pub mod transcript {
    pub mod domain {
        pub mod caption_reader;
        pub mod cue;
        pub mod cue_segmenter;
    }
    pub mod infrastructure;
}
