pub const GIT_STATE: GitState = GitState {
    time_stamp: 1700000000.0,
    utc_offset: 3600,
    is_dirty: false,
    count: Some(42),
    tag: Some("v1.0.0"),
    branch: Some("main"),
    digest: &[0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x00, 0xff, 0x10, 0xfe, 0x7c, 0x3a, 0x5b, 0x9d, 0x2e, 0x4f, 0x6a, 0x8c],
};
