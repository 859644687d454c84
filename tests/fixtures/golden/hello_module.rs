// Code generated by filemap. DO NOT EDIT.

pub mod hello {
    /// Embedded files, sorted by key.
    pub static HELLO: &[(&str, &[u8])] = &[
        ("testdata/hello/.gitignore", b"# this is a comment.\n"),
        ("testdata/hello/hello.txt", b"hello, world\n\n"),
    ];
}
