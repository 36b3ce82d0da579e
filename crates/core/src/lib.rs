pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod model_resolver;
    pub mod region;
    pub mod stream_info;
}

pub mod detection {
    pub mod domain {
        pub mod face_annotator;
        pub mod frame_canvas;
        pub mod overlay;
        pub mod region_detector;
    }
    pub mod infrastructure;
}

pub mod capture {
    pub mod domain {
        pub mod capture_error;
        pub mod frame_display;
        pub mod frame_source;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod capture_loop_use_case;
    pub mod pipeline_logger;
    mod release_guard;
}
