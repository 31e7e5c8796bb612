/**
 * Compiles the metadata and canonical number schemas from /resources
 * into `$OUT_DIR/proto_gen`.
 */

fn main() {
    println!("cargo:rerun-if-changed=resources/phonemetadata.proto");
    println!("cargo:rerun-if-changed=resources/phonenumber.proto");

    protobuf_codegen::Codegen::new()
        .pure()
        .includes(["resources"])
        .input("resources/phonemetadata.proto")
        .input("resources/phonenumber.proto")
        .cargo_out_dir("proto_gen")
        .run_from_script();
}
